//! Pagination module
//!
//! # Overview
//!
//! Fastly's JSON:API list endpoints are paged with `page[size]` and
//! `page[number]`, and advertise the following and final pages through
//! `links.next` and `links.last`. [`Paginator`] tracks the cursor and
//! issues one request per [`Paginator::get_next`] call.

mod paginator;
mod types;

pub use paginator::{page_number_from_link, Paginator, PAGE_NUMBER_PARAM, PAGE_SIZE_PARAM};
pub use types::{
    CursorPhase, LinkError, LinkPolicy, LinkRel, PageCursor, PageOptions, DEFAULT_PER_PAGE,
    MAX_PER_PAGE,
};
