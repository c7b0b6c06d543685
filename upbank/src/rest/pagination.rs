//! Cursor pagination: one request per page, following `links.next`.
//!
//! Walking a whole collection is left to the caller; each call here fetches
//! exactly one page.

use tracing::debug;
use url::Url;

use super::decode::decode_page;
use super::UpHttpClient;
use crate::error::Result;
use crate::types::{Page, Resource};
use crate::utils::parse_absolute_url;

/// Query parameter carrying the page size.
pub const PAGE_SIZE_PARAM: &str = "page[size]";

/// Query parameters that select a page within a collection.
pub const PAGINATION_PARAMS: [&str; 3] = ["page[size]", "page[after]", "page[before]"];

/// Which page to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// First page of the collection at `base`, with an explicit page size.
    First { base: String, page_size: u32 },
    /// A `links.next` URL returned by a previous page, used verbatim.
    Cursor(String),
}

impl PageRequest {
    pub fn first(base: impl Into<String>, page_size: u32) -> Self {
        PageRequest::First {
            base: base.into(),
            page_size,
        }
    }

    pub fn cursor(next: impl Into<String>) -> Self {
        PageRequest::Cursor(next.into())
    }

    /// Build the request URL.
    ///
    /// # Errors
    ///
    /// Returns `UpError::InvalidUrl` if the base or cursor is not an absolute
    /// HTTP URL.
    pub fn url(&self) -> Result<Url> {
        match self {
            PageRequest::First { base, page_size } => {
                let mut url = parse_absolute_url(base)?;
                let kept: Vec<(String, String)> = url
                    .query_pairs()
                    .filter(|(k, _)| k != PAGE_SIZE_PARAM)
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect();
                url.query_pairs_mut()
                    .clear()
                    .extend_pairs(kept)
                    .append_pair(PAGE_SIZE_PARAM, &page_size.to_string());
                Ok(url)
            }
            PageRequest::Cursor(next) => parse_absolute_url(next),
        }
    }
}

impl UpHttpClient {
    /// Fetch and decode a single page.
    pub async fn fetch_page<R: Resource>(
        &self,
        request: &PageRequest,
        token: &str,
    ) -> Result<Page<R>> {
        let url = request.url()?;
        let raw = self.request(&url, token).await?;
        let page = decode_page::<R>(&raw)?;
        debug!(
            collection = R::COLLECTION,
            records = page.data.len(),
            has_next = page.links.next.is_some(),
            "decoded page"
        );
        Ok(page)
    }
}
