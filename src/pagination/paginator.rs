//! Page-number paginator over a JSON:API list endpoint
//!
//! Each [`Paginator::get_next`] call issues exactly one GET with
//! `page[size]` and `page[number]`, decodes the page's resources, and
//! moves the cursor using the page numbers embedded in the response's
//! `next` and `last` links.

use super::types::{LinkError, LinkPolicy, LinkRel, PageCursor, PageOptions};
use crate::decode::{decode_links, decode_many, JsonApiResource};
use crate::error::{Error, Result};
use crate::http::{RequestConfig, Transport};
use futures::stream::{self, Stream};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Query parameter carrying the page size
pub const PAGE_SIZE_PARAM: &str = "page[size]";

/// Query parameter carrying the page number
pub const PAGE_NUMBER_PARAM: &str = "page[number]";

/// Base used to resolve relative pagination links
const LINK_BASE: &str = "https://api.fastly.com/";

/// Walks a list endpoint one page at a time
pub struct Paginator<T> {
    transport: Arc<dyn Transport>,
    path: String,
    options: PageOptions,
    cursor: PageCursor,
    link_policy: LinkPolicy,
    link_errors: Vec<LinkError>,
    _item: PhantomData<fn() -> T>,
}

impl<T: JsonApiResource> Paginator<T> {
    /// Create a paginator for `path`
    pub fn new(transport: Arc<dyn Transport>, path: impl Into<String>, options: PageOptions) -> Self {
        Self {
            transport,
            path: path.into(),
            options,
            cursor: PageCursor::new(),
            link_policy: LinkPolicy::default(),
            link_errors: Vec::new(),
            _item: PhantomData,
        }
    }

    /// Choose how unparseable pagination links are handled
    #[must_use]
    pub fn with_link_policy(mut self, policy: LinkPolicy) -> Self {
        self.link_policy = policy;
        self
    }

    /// True before the first fetch, then while pages remain
    pub fn has_next(&self) -> bool {
        self.cursor.has_next()
    }

    /// Pages left after the current one; 0 while the total is unknown
    pub fn remaining(&self) -> u32 {
        self.cursor.remaining()
    }

    /// Cursor state
    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    /// Last page fetched; 0 before the first fetch
    pub fn current_page(&self) -> u32 {
        self.cursor.current_page()
    }

    /// Page advertised by the `next` link
    pub fn next_page(&self) -> Option<u32> {
        self.cursor.next_page()
    }

    /// Page advertised by the `last` link
    pub fn last_page(&self) -> Option<u32> {
        self.cursor.last_page()
    }

    /// Link parse failures swallowed under [`LinkPolicy::Lenient`]
    pub fn link_errors(&self) -> &[LinkError] {
        &self.link_errors
    }

    /// Fetch and decode the next page
    ///
    /// The cursor only moves once the page has been decoded, so a failed
    /// call can be repeated for the same page.
    pub async fn get_next(&mut self) -> Result<Vec<T>> {
        let per_page = self.options.effective_per_page();
        let page = self
            .cursor
            .page_to_request(&self.options)
            .ok_or(Error::PageOutOfRange {
                after: self.cursor.current_page(),
            })?;

        let config = RequestConfig::new()
            .query(PAGE_SIZE_PARAM, per_page.to_string())
            .query(PAGE_NUMBER_PARAM, page.to_string())
            .accept_jsonapi();

        debug!(path = %self.path, page, per_page, "Fetching page");
        let body = self.transport.get(&self.path, config).await?;

        // Same buffer, two independent decodes.
        let links = decode_links(&body)?;
        let items: Vec<T> = decode_many(&body)?;

        let next = self.resolve_link(LinkRel::Next, links.next.as_deref())?;
        let last = self.resolve_link(LinkRel::Last, links.last.as_deref())?;

        self.cursor.advance(page, next, last);
        debug!(
            path = %self.path,
            page,
            items = items.len(),
            remaining = self.cursor.remaining(),
            "Fetched page"
        );

        Ok(items)
    }

    /// Drain every remaining page into one vector
    pub async fn collect_all(&mut self) -> Result<Vec<T>> {
        let mut all = Vec::new();
        while self.has_next() {
            all.extend(self.get_next().await?);
        }
        Ok(all)
    }

    /// Turn the paginator into a stream of pages
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<T>>> {
        stream::try_unfold(self, |mut paginator| async move {
            if !paginator.has_next() {
                return Ok(None);
            }
            let page = paginator.get_next().await?;
            Ok(Some((page, paginator)))
        })
    }

    fn resolve_link(&mut self, rel: LinkRel, link: Option<&str>) -> Result<Option<u32>> {
        let Some(link) = link else {
            return Ok(None);
        };

        match page_number_from_link(rel, link) {
            Ok(page) => Ok(Some(page)),
            Err(err) => match self.link_policy {
                LinkPolicy::Strict => Err(err.into()),
                LinkPolicy::Lenient => {
                    warn!(path = %self.path, "Ignoring pagination link: {err}");
                    self.link_errors.push(err);
                    Ok(None)
                }
            },
        }
    }
}

impl<T> std::fmt::Debug for Paginator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("path", &self.path)
            .field("options", &self.options)
            .field("cursor", &self.cursor)
            .field("link_policy", &self.link_policy)
            .finish_non_exhaustive()
    }
}

/// Read `page[number]` from a pagination link
///
/// Relative links are resolved against the API endpoint first.
pub fn page_number_from_link(rel: LinkRel, link: &str) -> std::result::Result<u32, LinkError> {
    let url = match Url::parse(link) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(LINK_BASE)
            .and_then(|base| base.join(link))
            .map_err(|source| LinkError::InvalidUrl {
                rel,
                link: link.to_string(),
                source,
            })?,
        Err(source) => {
            return Err(LinkError::InvalidUrl {
                rel,
                link: link.to_string(),
                source,
            })
        }
    };

    let value = url
        .query_pairs()
        .find(|(key, _)| key == PAGE_NUMBER_PARAM)
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| LinkError::MissingPageNumber {
            rel,
            link: link.to_string(),
        })?;

    value
        .trim()
        .parse::<u32>()
        .map_err(|_| LinkError::InvalidPageNumber {
            rel,
            link: link.to_string(),
            value,
        })
}
