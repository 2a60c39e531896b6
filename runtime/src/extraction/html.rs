//! Small selector helpers shared by the page objects.

use super::items::{Breadcrumb, Image, Request};
use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use url::Url;

/// Parse a selector literal. Only called with constant, valid selectors.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

/// Collapse runs of whitespace into single spaces and trim.
pub(crate) fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text of an element, `None` when blank.
pub(crate) fn element_text(el: &ElementRef<'_>) -> Option<String> {
    let text = normalize_ws(&el.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}

pub(crate) fn first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    scope.select(&selector(css)).next()
}

/// Text of the first element matching `css` inside `scope`.
pub(crate) fn first_text(scope: ElementRef<'_>, css: &str) -> Option<String> {
    first(scope, css).and_then(|el| element_text(&el))
}

/// Texts of every element matching `css`, blanks skipped.
pub(crate) fn all_texts(scope: ElementRef<'_>, css: &str) -> Vec<String> {
    scope
        .select(&selector(css))
        .filter_map(|el| element_text(&el))
        .collect()
}

pub(crate) fn first_attr(scope: ElementRef<'_>, css: &str, attr: &str) -> Option<String> {
    first(scope, css)
        .and_then(|el| el.value().attr(attr))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Resolve `href` against the page URL.
pub(crate) fn resolve(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }
    base.join(href).ok().map(|u| u.to_string())
}

/// `GET` requests for every `a[href]` matching `css`, named by link text.
pub(crate) fn link_requests(doc: &Html, css: &str, base: &Url) -> Vec<Request> {
    doc.select(&selector(css))
        .filter_map(|el| {
            let url = resolve(base, el.value().attr("href")?)?;
            Some(Request::get(url, element_text(&el)))
        })
        .collect()
}

/// The pagination link: `a[rel=next]`, else the first link reading "Next".
pub(crate) fn next_page_link<'a>(doc: &'a Html) -> Option<ElementRef<'a>> {
    if let Some(el) = doc.select(&selector(r#"a[rel="next"][href]"#)).next() {
        return Some(el);
    }
    doc.select(&selector("a[href]")).find(|el| {
        element_text(el)
            .map(|t| t.starts_with("Next"))
            .unwrap_or(false)
    })
}

/// Next page as a navigation request.
pub(crate) fn next_page_request(doc: &Html, base: &Url) -> Option<Request> {
    let el = next_page_link(doc)?;
    resolve(base, el.value().attr("href")?).map(|url| Request::get(url, None))
}

/// `page` query parameter of the page URL, 1 when absent or invalid.
pub(crate) fn page_number(url: &Url) -> u32 {
    url.query_pairs()
        .find(|(k, _)| k == "page")
        .and_then(|(_, v)| v.parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1)
}

/// Last non-empty path segment, used as an item id.
pub(crate) fn last_path_segment(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|s| !s.is_empty())
        .last()
        .map(|s| s.to_string())
}

/// Breadcrumb trail from `.breadcrumb a` links.
pub(crate) fn breadcrumbs(doc: &Html, base: &Url) -> Vec<Breadcrumb> {
    doc.select(&selector(".breadcrumb a"))
        .filter_map(|el| {
            let name = element_text(&el)?;
            let url = el.value().attr("href").and_then(|h| resolve(base, h));
            Some(Breadcrumb { name, url })
        })
        .collect()
}

/// Images from every `img[src]` under `css`, resolved and de-duplicated.
pub(crate) fn images(doc: &Html, css: &str, base: &Url) -> Vec<Image> {
    let mut seen = Vec::<String>::new();
    for el in doc.select(&selector(css)) {
        if let Some(url) = el.value().attr("src").and_then(|s| resolve(base, s)) {
            if !seen.contains(&url) {
                seen.push(url);
            }
        }
    }
    seen.into_iter().map(|url| Image { url }).collect()
}

/// Parse a human date such as `Sep 07, 2023` into `2023-09-07T00:00:00Z`.
pub(crate) fn parse_date(raw: &str) -> Option<String> {
    const FORMATS: [&str; 4] = ["%b %d, %Y", "%B %d, %Y", "%Y-%m-%d", "%d %B %Y"];
    let raw = raw.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .map(|d| d.format("%Y-%m-%dT00:00:00Z").to_string())
}

/// ISO 4217 code for a currency symbol, when unambiguous.
pub(crate) fn currency_code(symbol: &str) -> Option<&'static str> {
    match symbol.trim() {
        "$" | "US$" | "USD" => Some("USD"),
        "€" | "EUR" => Some("EUR"),
        "£" | "GBP" => Some("GBP"),
        "¥" | "JPY" => Some("JPY"),
        _ => None,
    }
}

/// A price split into its decimal value and the raw currency marker.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Price {
    pub value: String,
    pub currency_raw: Option<String>,
}

/// Parse `$1,299.00`, `€ 15` or `15.50 USD` style prices.
pub(crate) fn parse_price(raw: &str) -> Option<Price> {
    static PRICE_RE: OnceLock<Regex> = OnceLock::new();
    let re = PRICE_RE.get_or_init(|| {
        Regex::new(r"^\s*([^\d\s.,]*)\s*(\d[\d,]*(?:\.\d+)?)\s*([^\d\s.,]*)\s*$").unwrap()
    });
    let caps = re.captures(raw)?;
    let value = caps[2].replace(',', "");
    let marker = [&caps[1], &caps[3]]
        .into_iter()
        .find(|m| !m.is_empty())
        .map(|m| m.to_string());
    Some(Price {
        value,
        currency_raw: marker,
    })
}
