//! Page objects for the fixture websites.
//!
//! Each structured output key of an extract request is bound to one page
//! object type in [`PAGE_OBJECTS`]. A page object is built from the fetched
//! URL and raw body, and produces a single [`Item`] on demand.

pub mod adapter;
pub mod articles;
pub mod ecommerce;
pub(crate) mod html;
pub mod items;
pub mod jobs;

pub use adapter::{ItemAdapter, RawItemAdapter, ZyteItemAdapter};
pub use items::Item;

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

/// Errors raised while building or running a page object.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("invalid page URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to serialize item: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The fetched page a page object works on.
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// The URL exactly as requested, echoed in items.
    pub raw_url: String,
    /// Parsed form of `raw_url`, for resolving links.
    pub url: Url,
    pub body: Bytes,
}

impl PageResponse {
    /// Pair a page URL with its raw body. The URL must be absolute.
    pub fn new(raw_url: &str, body: Bytes) -> Result<Self, ExtractionError> {
        let url = Url::parse(raw_url).map_err(|source| ExtractionError::InvalidUrl {
            url: raw_url.to_string(),
            source,
        })?;
        Ok(Self {
            raw_url: raw_url.to_string(),
            url,
            body,
        })
    }

    /// Body as text. Fixture sites serve UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A parser for one kind of page.
#[async_trait]
pub trait PageObject: Send + Sync {
    async fn to_item(&self) -> Result<Item, ExtractionError>;
}

/// Constructor stored in the dispatch table.
pub type PageObjectBuilder = fn(PageResponse) -> Box<dyn PageObject>;

fn build<P>(response: PageResponse) -> Box<dyn PageObject>
where
    P: PageObject + From<PageResponse> + 'static,
{
    Box::new(P::from(response))
}

/// Structured output keys and the page object bound to each.
pub const PAGE_OBJECTS: &[(&str, PageObjectBuilder)] = &[
    ("product", build::<ecommerce::ProductPage>),
    ("productList", build::<ecommerce::ProductListPage>),
    ("productNavigation", build::<ecommerce::ProductNavigationPage>),
    ("jobPosting", build::<jobs::JobPostingPage>),
    ("jobPostingNavigation", build::<jobs::JobPostingNavigationPage>),
    ("article", build::<articles::ArticlePage>),
    ("articleNavigation", build::<articles::ArticleNavigationPage>),
];

/// Look up the page object bound to a structured output key.
pub fn page_object_for(key: &str) -> Option<PageObjectBuilder> {
    PAGE_OBJECTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, builder)| *builder)
}
