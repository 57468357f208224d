//! Pagination types shared by every resource store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

/// Limit sent to the backend when every record is requested.
pub const ALL_PAGE_LIMIT: u32 = 100_000;

/// Default number of rows per page in the admin tables.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Rows per page: a positive limit, or every record at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Limit(u32),
    All,
}

impl PageSize {
    /// Limit to send to the backend.
    pub fn limit(&self) -> u32 {
        match self {
            PageSize::Limit(n) => (*n).max(1),
            PageSize::All => ALL_PAGE_LIMIT,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, PageSize::All)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Limit(DEFAULT_PAGE_SIZE)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Limit(n) => write!(f, "{}", n),
            PageSize::All => f.write_str("all"),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(PageSize::All);
        }
        match s.parse::<u32>() {
            Ok(n) if n > 0 => Ok(PageSize::Limit(n)),
            _ => Err(format!("Invalid page size: {:?}", s)),
        }
    }
}

impl Serialize for PageSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageSize::Limit(n) => serializer.serialize_u32(*n),
            PageSize::All => serializer.serialize_str("all"),
        }
    }
}

/// Where the currently held records sit in the full result set.
///
/// Only ever set from a completed fetch, never derived from a partial list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_records: u64,
    pub page_size: PageSize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
            total_records: 0,
            page_size: PageSize::default(),
        }
    }
}

impl PageWindow {
    /// Build a window, keeping `current_page` within `[1, max(total_pages, 1)]`.
    pub fn new(current_page: u32, total_pages: u32, total_records: u64, page_size: PageSize) -> Self {
        Self {
            current_page: current_page.clamp(1, total_pages.max(1)),
            total_pages,
            total_records,
            page_size,
        }
    }

    /// Pagination controls are hidden when every record is shown.
    pub fn shows_pagination(&self) -> bool {
        !self.page_size.is_all()
    }

    /// Whether `page` is a valid navigation target.
    pub fn contains_page(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }
}

/// Parameters of a single list fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: u32,
    pub page_size: PageSize,
    pub search: String,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: PageSize::default(),
            search: String::new(),
        }
    }
}

impl PageQuery {
    pub fn new(page: u32, page_size: PageSize, search: impl Into<String>) -> Self {
        Self {
            page: page.max(1),
            page_size,
            search: search.into(),
        }
    }

    /// Search text with surrounding whitespace removed; empty means no filter.
    pub fn search_term(&self) -> &str {
        self.search.trim()
    }

    /// Query string for `GET /{resource}`.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("limit", self.page_size.limit().to_string()),
            ("page", self.page.max(1).to_string()),
            ("search", self.search_term().to_string()),
        ]
    }
}

/// `GET /{resource}` response envelope.
#[derive(Debug, Deserialize)]
pub struct PageEnvelope<T> {
    pub data: RawPage<T>,
}

/// One page of raw backend records.
#[derive(Debug, Deserialize)]
pub struct RawPage<T> {
    pub records: Vec<T>,
    pub current_page: u32,
    pub last_page: u32,
    pub total: u64,
}
