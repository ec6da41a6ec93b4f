//! Pagination types
//!
//! Request options, the page cursor and link-parse outcomes.

use crate::error::Error;
use thiserror::Error as ThisError;

/// Page size used when the caller does not pick one
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Largest page size the API accepts
pub const MAX_PER_PAGE: u32 = 100;

/// Caller-supplied page options
///
/// Zero means "unset" for both fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageOptions {
    /// Items per page; 0 selects [`DEFAULT_PER_PAGE`], larger values are capped
    pub per_page: u32,
    /// 1-indexed starting page; 0 starts from the beginning
    pub page: u32,
}

impl PageOptions {
    /// Options with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Set the starting page
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// The page size actually sent as `page[size]`
    pub fn effective_per_page(&self) -> u32 {
        if self.per_page == 0 {
            DEFAULT_PER_PAGE
        } else {
            self.per_page.min(MAX_PER_PAGE)
        }
    }
}

/// Where a paginator is in its walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorPhase {
    /// No request issued yet
    #[default]
    NotStarted,
    /// At least one page fetched and more are advertised
    InProgress,
    /// The last advertised page has been fetched
    Exhausted,
}

/// Page cursor state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCursor {
    phase: CursorPhase,
    current_page: u32,
    next_page: Option<u32>,
    last_page: Option<u32>,
}

impl PageCursor {
    /// A cursor that has not fetched anything
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    pub fn phase(&self) -> CursorPhase {
        self.phase
    }

    /// Last page fetched; 0 before the first fetch
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Page number advertised by the most recent valid `next` link
    pub fn next_page(&self) -> Option<u32> {
        self.next_page
    }

    /// Page number advertised by the most recent valid `last` link
    pub fn last_page(&self) -> Option<u32> {
        self.last_page
    }

    /// Pages left after the current one; 0 while the total is unknown
    pub fn remaining(&self) -> u32 {
        self.last_page
            .map_or(0, |last| last.saturating_sub(self.current_page))
    }

    /// Whether another fetch should be issued
    ///
    /// Always true before the first fetch, even for an empty collection.
    pub fn has_next(&self) -> bool {
        match self.phase {
            CursorPhase::NotStarted => true,
            CursorPhase::InProgress | CursorPhase::Exhausted => self.remaining() != 0,
        }
    }

    /// The page number the next fetch should request
    ///
    /// `None` once the page number would overflow `u32`.
    pub fn page_to_request(&self, options: &PageOptions) -> Option<u32> {
        match self.phase {
            CursorPhase::NotStarted if options.page == 0 => Some(1),
            CursorPhase::NotStarted => Some(options.page),
            CursorPhase::InProgress | CursorPhase::Exhausted => self.current_page.checked_add(1),
        }
    }

    /// Record a successfully decoded page
    ///
    /// `None` for `next`/`last` leaves the previous value in place.
    pub fn advance(&mut self, fetched: u32, next: Option<u32>, last: Option<u32>) {
        self.current_page = fetched;
        if next.is_some() {
            self.next_page = next;
        }
        if last.is_some() {
            self.last_page = last;
        }
        self.phase = if self.remaining() == 0 {
            CursorPhase::Exhausted
        } else {
            CursorPhase::InProgress
        };
    }
}

/// What to do when a pagination link cannot be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkPolicy {
    /// Log a warning, remember the failure, keep the previous cursor value
    #[default]
    Lenient,
    /// Fail the fetch with [`Error::PaginationLink`]
    Strict,
}

/// Which link a parse failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRel {
    Next,
    Last,
}

impl std::fmt::Display for LinkRel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkRel::Next => f.write_str("next"),
            LinkRel::Last => f.write_str("last"),
        }
    }
}

/// Failure to read `page[number]` out of a pagination link
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("{rel} link '{link}' is not a valid URL: {source}")]
    InvalidUrl {
        rel: LinkRel,
        link: String,
        source: url::ParseError,
    },

    #[error("{rel} link '{link}' has no page[number] parameter")]
    MissingPageNumber { rel: LinkRel, link: String },

    #[error("{rel} link '{link}' has non-numeric page[number] '{value}'")]
    InvalidPageNumber {
        rel: LinkRel,
        link: String,
        value: String,
    },
}

impl LinkError {
    /// The offending link
    pub fn link(&self) -> &str {
        match self {
            LinkError::InvalidUrl { link, .. }
            | LinkError::MissingPageNumber { link, .. }
            | LinkError::InvalidPageNumber { link, .. } => link,
        }
    }

    /// Which link failed
    pub fn rel(&self) -> LinkRel {
        match self {
            LinkError::InvalidUrl { rel, .. }
            | LinkError::MissingPageNumber { rel, .. }
            | LinkError::InvalidPageNumber { rel, .. } => *rel,
        }
    }
}

impl From<LinkError> for Error {
    fn from(err: LinkError) -> Self {
        Error::pagination_link(err.link().to_string(), err.to_string())
    }
}
