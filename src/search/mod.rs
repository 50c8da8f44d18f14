//! Image search: the collaborator that feeds the gallery.
//!
//! The gallery only needs one operation: fetch a page of hits for a query.
//! [`ImageSearch`] captures that, [`PixabayClient`] implements it over HTTP,
//! and tests substitute their own implementations.
//!
//! ```rust
//! use bubbletea_gallery::search::{SearchQuery, total_pages};
//!
//! let query = SearchQuery::new(" sunset ", 40).unwrap().with_page(2);
//! assert_eq!(query.text(), "sunset");
//! assert_eq!(total_pages(95, 40), 3);
//! ```

pub mod client;
pub mod types;

use async_trait::async_trait;

use crate::error::SearchError;

pub use client::{PixabayClient, DEFAULT_BASE_URL};
pub use types::{total_pages, Hit, SearchPage, SearchQuery};

/// A source of image search results.
#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Fetches the page of results described by `query`.
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, SearchError>;
}
