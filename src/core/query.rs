//! Query parameters and pagination utilities

use crate::core::draft::StoredConfiguration;
use serde::{Deserialize, Serialize};

/// Records per listing page
pub const PAGE_SIZE: usize = 10;

/// Query parameters of the listing endpoint
///
/// `page` is kept as raw text and parsed leniently, so a malformed value
/// falls back to the first page instead of rejecting the request.
///
/// # Example
/// ```rust,ignore
/// GET /configurations?page=2     // page 2
/// GET /configurations?page=2abc  // page 2 (leading digits)
/// GET /configurations?page=abc   // page 1
/// GET /configurations            // page 1
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<String>,
}

impl PageQuery {
    pub fn with_page(page: usize) -> Self {
        Self {
            page: Some(page.to_string()),
        }
    }

    /// Page number, at least 1
    pub fn page(&self) -> usize {
        self.page.as_deref().map(parse_page).unwrap_or(1)
    }
}

fn parse_page(raw: &str) -> usize {
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    digits.parse::<usize>().ok().filter(|page| *page >= 1).unwrap_or(1)
}

/// Neighbouring page numbers, `None` at the boundaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    pub previous: Option<usize>,
    pub next: Option<usize>,
}

/// Pagination metadata of a listing response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub page_size: usize,
    pub total_configs: usize,
    pub total_pages: usize,
    pub offset: usize,
    pub meta: PageLinks,
}

impl Pagination {
    /// Compute the metadata for `page` over `total` records
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        // Ensure page_size is at least 1 to avoid division by zero
        let page_size = page_size.max(1);
        let page = page.max(1);
        let total_pages = total.div_ceil(page_size);

        Self {
            current_page: page,
            page_size,
            total_configs: total,
            total_pages,
            offset: (page - 1).saturating_mul(page_size),
            meta: PageLinks {
                previous: (page > 1).then(|| page - 1),
                next: (page < total_pages).then(|| page + 1),
            },
        }
    }
}

/// Body of `GET /configurations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationListing {
    pub title: String,
    pub configurations: Vec<StoredConfiguration>,
    pub pagination: Pagination,
}
