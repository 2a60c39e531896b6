//! Item types produced by page objects.
//!
//! Field names serialize in camelCase to match the extraction API wire
//! format. Unset fields serialize as `null` or `[]`; the item adapter strips
//! them before they reach a response.

use chrono::Utc;
use serde::Serialize;

/// Any item a page object can produce.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Item {
    Product(Product),
    ProductList(ProductList),
    ProductNavigation(ProductNavigation),
    JobPosting(JobPosting),
    JobPostingNavigation(JobPostingNavigation),
    Article(Article),
    ArticleNavigation(ArticleNavigation),
}

/// Download metadata attached to every item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// UTC time of extraction, second precision (`2024-01-31T12:00:00Z`).
    pub date_downloaded: String,
    /// Extraction confidence. Navigation items carry none.
    pub probability: Option<f64>,
}

impl Metadata {
    /// Metadata for detail and list items. Fixture pages are always certain.
    pub fn with_probability() -> Self {
        Self {
            date_downloaded: now_timestamp(),
            probability: Some(1.0),
        }
    }

    /// Metadata for navigation items.
    pub fn navigation() -> Self {
        Self {
            date_downloaded: now_timestamp(),
            probability: None,
        }
    }
}

fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

// ── Shared building blocks ──────────────────────────────────────────────────

/// A follow-up request, as used in navigation items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    pub url: String,
    pub method: String,
    pub name: Option<String>,
}

impl Request {
    pub fn get(url: impl Into<String>, name: Option<String>) -> Self {
        Self {
            url: url.into(),
            method: "GET".to_string(),
            name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub url: String,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breadcrumb {
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Named {
    pub name: String,
}

// ── E-commerce ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdditionalProperty {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRating {
    pub rating_value: Option<f64>,
    pub best_rating: Option<f64>,
    pub review_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub url: String,
    pub product_id: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub currency: Option<String>,
    pub currency_raw: Option<String>,
    pub sku: Option<String>,
    pub brand: Option<Named>,
    pub availability: Option<String>,
    pub main_image: Option<Image>,
    pub images: Vec<Image>,
    pub description: Option<String>,
    pub description_html: Option<String>,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub additional_properties: Vec<AdditionalProperty>,
    pub aggregate_rating: Option<AggregateRating>,
    pub metadata: Metadata,
}

/// One entry of a product listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFromList {
    pub url: Option<String>,
    pub product_id: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub currency: Option<String>,
    pub currency_raw: Option<String>,
    pub main_image: Option<Image>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductList {
    pub url: String,
    pub category_name: Option<String>,
    pub products: Vec<ProductFromList>,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub pagination_next: Option<Link>,
    pub page_number: u32,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNavigation {
    pub url: String,
    pub category_name: Option<String>,
    pub sub_categories: Vec<Request>,
    pub items: Vec<Request>,
    pub next_page: Option<Request>,
    pub page_number: u32,
    pub metadata: Metadata,
}

// ── Jobs ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobLocation {
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseSalary {
    pub value_min: Option<String>,
    pub value_max: Option<String>,
    pub currency: Option<String>,
    pub currency_raw: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub url: String,
    pub job_posting_id: Option<String>,
    pub date_published: Option<String>,
    pub date_published_raw: Option<String>,
    pub job_title: Option<String>,
    pub job_location: Option<JobLocation>,
    pub description: Option<String>,
    pub description_html: Option<String>,
    pub employment_type: Option<String>,
    pub base_salary: Option<BaseSalary>,
    pub requirements: Vec<String>,
    pub hiring_organization: Option<Named>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingNavigation {
    pub url: String,
    pub items: Vec<Request>,
    pub next_page: Option<Request>,
    pub page_number: u32,
    pub metadata: Metadata,
}

// ── Articles ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: Option<String>,
    pub name_raw: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub url: String,
    pub headline: Option<String>,
    pub date_published: Option<String>,
    pub date_published_raw: Option<String>,
    pub authors: Vec<Author>,
    pub description: Option<String>,
    pub article_body: Option<String>,
    pub article_body_html: Option<String>,
    pub main_image: Option<Image>,
    pub images: Vec<Image>,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleNavigation {
    pub url: String,
    pub category_name: Option<String>,
    pub sub_categories: Vec<Request>,
    pub items: Vec<Request>,
    pub next_page: Option<Request>,
    pub page_number: u32,
    pub metadata: Metadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_timestamp_format() {
        let meta = Metadata::with_probability();
        assert!(chrono::DateTime::parse_from_rfc3339(&meta.date_downloaded).is_ok());
        assert!(meta.date_downloaded.ends_with('Z'));
        assert_eq!(meta.probability, Some(1.0));
        assert_eq!(Metadata::navigation().probability, None);
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let v = serde_json::to_value(Request::get("https://example.com/a", None)).unwrap();
        assert_eq!(v["method"], "GET");
        assert!(v["name"].is_null());
    }

    #[test]
    fn test_item_is_untagged() {
        let item = Item::JobPostingNavigation(JobPostingNavigation {
            url: "https://example.com/jobs/1".to_string(),
            items: vec![],
            next_page: None,
            page_number: 1,
            metadata: Metadata::navigation(),
        });
        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(v["url"], "https://example.com/jobs/1");
        assert_eq!(v["pageNumber"], 1);
    }
}
