//! JSON:API codec module
//!
//! # Overview
//!
//! Fastly's newer endpoints speak JSON:API: every resource carries a
//! `type`, an `id`, an `attributes` map and a `relationships` map, and
//! list endpoints return an array of such resources plus pagination
//! `links`. This module turns those payloads into typed models through
//! the [`JsonApiResource`] trait, and request inputs back into documents
//! through [`ToResource`].

mod decoders;
mod types;

pub use decoders::{decode_links, decode_many, decode_one, encode_one};
pub use types::{
    Document, JsonApiResource, Linkage, Links, Relationship, ResourceIdentifier, ResourceObject,
    ToResource,
};
