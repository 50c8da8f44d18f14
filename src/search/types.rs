//! Request and response types for the image search API.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// A single image result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    /// Pixabay image id.
    pub id: u64,
    /// Medium-size image shown on the card.
    #[serde(rename = "webformatURL")]
    pub webformat_url: String,
    /// Full-size image shown in the lightbox.
    #[serde(rename = "largeImageURL")]
    pub large_image_url: String,
    /// Comma separated tags, used as the caption.
    #[serde(default)]
    pub tags: String,
    /// Number of likes.
    #[serde(default)]
    pub likes: u64,
    /// Number of views.
    #[serde(default)]
    pub views: u64,
    /// Number of comments.
    #[serde(default)]
    pub comments: u64,
    /// Number of downloads.
    #[serde(default)]
    pub downloads: u64,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Total number of matching images.
    #[serde(default)]
    pub total: u64,
    /// Number of images reachable through the API.
    #[serde(rename = "totalHits", default)]
    pub total_hits: u64,
    /// Hits on this page.
    #[serde(default)]
    pub hits: Vec<Hit>,
}

impl SearchPage {
    /// Number of pages needed to show every reachable hit.
    pub fn total_pages(&self, per_page: u32) -> u32 {
        total_pages(self.total_hits, per_page)
    }
}

/// A search for one page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    /// 1-based page number.
    pub page: u32,
    /// Results per page.
    pub per_page: u32,
}

impl SearchQuery {
    /// Builds a query for page 1. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// [`SearchError::EmptyQuery`] if nothing but whitespace was given.
    pub fn new(text: &str, per_page: u32) -> Result<Self, SearchError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        Ok(Self {
            text: text.to_string(),
            page: 1,
            per_page: per_page.max(1),
        })
    }

    /// The same query for another page.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// The trimmed query text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// `ceil(total_hits / per_page)`; a `per_page` of zero counts as one.
///
/// ```rust
/// use bubbletea_gallery::search::total_pages;
///
/// assert_eq!(total_pages(0, 40), 0);
/// assert_eq!(total_pages(40, 40), 1);
/// assert_eq!(total_pages(41, 40), 2);
/// assert_eq!(total_pages(500, 40), 13);
/// ```
pub fn total_pages(total_hits: u64, per_page: u32) -> u32 {
    let pages = total_hits.div_ceil(u64::from(per_page.max(1)));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
