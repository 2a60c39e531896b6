//! Page objects for the jobs fixture website.
//!
//! Listing pages link each posting with `a.job-link`. Posting pages carry
//! the title in `h1`, the description in `<article>` and the remaining
//! attributes in `.job-*` elements.

use super::html::{self, element_text};
use super::items::{
    BaseSalary, Item, JobLocation, JobPosting, JobPostingNavigation, Metadata, Named,
};
use super::{ExtractionError, PageObject, PageResponse};
use async_trait::async_trait;
use regex::Regex;
use scraper::Html;
use std::sync::OnceLock;

/// Extracts a [`JobPosting`] from a single posting page.
pub struct JobPostingPage {
    response: PageResponse,
}

impl From<PageResponse> for JobPostingPage {
    fn from(response: PageResponse) -> Self {
        Self { response }
    }
}

impl JobPostingPage {
    pub fn extract(&self) -> JobPosting {
        let url = &self.response.url;
        let doc = Html::parse_document(&self.response.text());
        let root = doc.root_element();

        let date_published_raw = html::first_text(root, ".job-date");
        let description_el = html::first(root, "article");

        JobPosting {
            url: self.response.raw_url.clone(),
            job_posting_id: html::last_path_segment(url),
            date_published: date_published_raw.as_deref().and_then(html::parse_date),
            date_published_raw,
            job_title: html::first_text(root, "h1"),
            job_location: html::first_text(root, ".job-location").map(|raw| JobLocation { raw }),
            description: description_el.as_ref().and_then(element_text),
            description_html: description_el.map(|el| el.html()),
            employment_type: html::first_text(root, ".job-type"),
            base_salary: html::first_text(root, ".job-salary")
                .as_deref()
                .and_then(parse_salary),
            requirements: html::all_texts(root, ".job-experience"),
            hiring_organization: html::first_text(root, ".job-company").map(|name| Named { name }),
            metadata: Metadata::with_probability(),
        }
    }
}

#[async_trait]
impl PageObject for JobPostingPage {
    async fn to_item(&self) -> Result<Item, ExtractionError> {
        Ok(Item::JobPosting(self.extract()))
    }
}

/// Extracts posting links and pagination from a job listing page.
pub struct JobPostingNavigationPage {
    response: PageResponse,
}

impl From<PageResponse> for JobPostingNavigationPage {
    fn from(response: PageResponse) -> Self {
        Self { response }
    }
}

impl JobPostingNavigationPage {
    pub fn extract(&self) -> JobPostingNavigation {
        let url = &self.response.url;
        let doc = Html::parse_document(&self.response.text());

        JobPostingNavigation {
            url: self.response.raw_url.clone(),
            items: html::link_requests(&doc, "a.job-link[href]", url),
            next_page: html::next_page_request(&doc, url),
            page_number: html::page_number(url),
            metadata: Metadata::navigation(),
        }
    }
}

#[async_trait]
impl PageObject for JobPostingNavigationPage {
    async fn to_item(&self) -> Result<Item, ExtractionError> {
        Ok(Item::JobPostingNavigation(self.extract()))
    }
}

/// Parse salary ranges such as `$63K - $101K` or `€40,000`.
fn parse_salary(raw: &str) -> Option<BaseSalary> {
    static SALARY_RE: OnceLock<Regex> = OnceLock::new();
    let re = SALARY_RE.get_or_init(|| {
        Regex::new(
            r"(?x)^\s*
              ([^\d\s]*)\s*(\d[\d.,]*[KkMm]?)
              (?:\s*(?:-|–|to)\s*[^\d\s]*\s*(\d[\d.,]*[KkMm]?))?",
        )
        .unwrap()
    });
    let caps = re.captures(raw)?;
    let symbol = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    let currency = html::currency_code(symbol).map(str::to_string);
    let currency_raw = (currency.is_none() && !symbol.is_empty()).then(|| symbol.to_string());

    Some(BaseSalary {
        value_min: caps.get(2).map(|m| m.as_str().to_string()),
        value_max: caps.get(3).map(|m| m.as_str().to_string()),
        currency,
        currency_raw,
    })
}
