//! Page objects for the e-commerce fixture website.

use super::html::{self, element_text};
use super::items::{
    AdditionalProperty, AggregateRating, Image, Item, Link, Metadata, Named, Product,
    ProductFromList, ProductList, ProductNavigation,
};
use super::{ExtractionError, PageObject, PageResponse};
use async_trait::async_trait;
use scraper::{ElementRef, Html};
use url::Url;

/// Price, ISO code and raw marker read from a `.product-price` element.
fn price_fields(scope: ElementRef<'_>) -> (Option<String>, Option<String>, Option<String>) {
    let Some(price) = html::first_text(scope, ".product-price")
        .as_deref()
        .and_then(html::parse_price)
    else {
        return (None, None, None);
    };
    let currency = price
        .currency_raw
        .as_deref()
        .and_then(html::currency_code)
        .map(str::to_string);
    (Some(price.value), currency, price.currency_raw)
}

/// Schema.org-style availability from the stock label.
fn availability(label: &str) -> String {
    let lower = label.to_ascii_lowercase();
    if lower.contains("out of stock") || lower.contains("sold out") {
        "OutOfStock".to_string()
    } else {
        "InStock".to_string()
    }
}

fn parse_number<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|s| s.trim().parse().ok())
}

/// Extracts a [`Product`] from a product detail page.
pub struct ProductPage {
    response: PageResponse,
}

impl From<PageResponse> for ProductPage {
    fn from(response: PageResponse) -> Self {
        Self { response }
    }
}

impl ProductPage {
    pub fn extract(&self) -> Product {
        let url = &self.response.url;
        let doc = Html::parse_document(&self.response.text());
        let root = doc.root_element();

        let (price, currency, currency_raw) = price_fields(root);
        let images = html::images(&doc, ".product-image img", url);
        let description_el = html::first(root, ".product-description");

        let additional_properties = doc
            .select(&html::selector(".product-properties tr"))
            .filter_map(|row| {
                Some(AdditionalProperty {
                    name: html::first_text(row, "th")?,
                    value: html::first_text(row, "td")?,
                })
            })
            .collect();

        let aggregate_rating = html::first(root, ".product-rating").map(|el| AggregateRating {
            rating_value: parse_number(el.value().attr("data-rating")),
            best_rating: parse_number(el.value().attr("data-best")),
            review_count: parse_number(el.value().attr("data-reviews")),
        });

        Product {
            url: self.response.raw_url.clone(),
            product_id: html::last_path_segment(url),
            name: html::first_text(root, "h1"),
            price,
            currency,
            currency_raw,
            sku: html::first_text(root, ".product-sku"),
            brand: html::first_text(root, ".product-brand").map(|name| Named { name }),
            availability: html::first_text(root, ".product-stock").map(|s| availability(&s)),
            main_image: images.first().cloned(),
            images,
            description: description_el.as_ref().and_then(element_text),
            description_html: description_el.map(|el| el.html()),
            breadcrumbs: html::breadcrumbs(&doc, url),
            additional_properties,
            aggregate_rating,
            metadata: Metadata::with_probability(),
        }
    }
}

#[async_trait]
impl PageObject for ProductPage {
    async fn to_item(&self) -> Result<Item, ExtractionError> {
        Ok(Item::Product(self.extract()))
    }
}

/// Extracts a [`ProductList`] from a category or search page.
pub struct ProductListPage {
    response: PageResponse,
}

impl From<PageResponse> for ProductListPage {
    fn from(response: PageResponse) -> Self {
        Self { response }
    }
}

impl ProductListPage {
    fn product_from_card(card: ElementRef<'_>, base: &Url) -> ProductFromList {
        let link = html::first(card, "a.product-link[href]");
        let url = link
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| html::resolve(base, href));
        let product_id = url
            .as_deref()
            .and_then(|u| Url::parse(u).ok())
            .and_then(|u| html::last_path_segment(&u));
        let (price, currency, currency_raw) = price_fields(card);

        ProductFromList {
            name: link.as_ref().and_then(element_text),
            url,
            product_id,
            price,
            currency,
            currency_raw,
            main_image: html::first_attr(card, "img[src]", "src")
                .and_then(|src| html::resolve(base, &src))
                .map(|url| Image { url }),
        }
    }

    pub fn extract(&self) -> ProductList {
        let url = &self.response.url;
        let doc = Html::parse_document(&self.response.text());
        let root = doc.root_element();

        let products = doc
            .select(&html::selector(".product-card"))
            .map(|card| Self::product_from_card(card, url))
            .collect();

        let pagination_next = html::next_page_link(&doc).and_then(|el| {
            let url = html::resolve(url, el.value().attr("href")?)?;
            Some(Link {
                url,
                text: element_text(&el),
            })
        });

        ProductList {
            url: self.response.raw_url.clone(),
            category_name: html::first_text(root, "h1"),
            products,
            breadcrumbs: html::breadcrumbs(&doc, url),
            pagination_next,
            page_number: html::page_number(url),
            metadata: Metadata::with_probability(),
        }
    }
}

#[async_trait]
impl PageObject for ProductListPage {
    async fn to_item(&self) -> Result<Item, ExtractionError> {
        Ok(Item::ProductList(self.extract()))
    }
}

/// Extracts subcategory and product links from a category page.
pub struct ProductNavigationPage {
    response: PageResponse,
}

impl From<PageResponse> for ProductNavigationPage {
    fn from(response: PageResponse) -> Self {
        Self { response }
    }
}

impl ProductNavigationPage {
    pub fn extract(&self) -> ProductNavigation {
        let url = &self.response.url;
        let doc = Html::parse_document(&self.response.text());

        ProductNavigation {
            url: self.response.raw_url.clone(),
            category_name: html::first_text(doc.root_element(), "h1"),
            sub_categories: html::link_requests(&doc, "a.category-link[href]", url),
            items: html::link_requests(&doc, "a.product-link[href]", url),
            next_page: html::next_page_request(&doc, url),
            page_number: html::page_number(url),
            metadata: Metadata::navigation(),
        }
    }
}

#[async_trait]
impl PageObject for ProductNavigationPage {
    async fn to_item(&self) -> Result<Item, ExtractionError> {
        Ok(Item::ProductNavigation(self.extract()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    const PRODUCT: &str = r#"<html><body>
<nav class="breadcrumb"><a href="/">Home</a> / <a href="/category/3">Kitchen</a></nav>
<h1>Chef Knife</h1>
<div class="product-image"><img src="/img/knife.jpg"><img src="/img/knife-side.jpg"></div>
<p class="product-price">$1,049.50</p>
<p class="product-sku">KN-001</p>
<p class="product-brand">Sharp Co</p>
<p class="product-stock">In stock</p>
<div class="product-rating" data-rating="4.5" data-best="5" data-reviews="12"></div>
<div class="product-description"><p>Very
  sharp.</p></div>
<table class="product-properties">
  <tr><th>Blade</th><td>Steel</td></tr>
  <tr><th>Length</th><td>20 cm</td></tr>
  <tr><th>Empty</th></tr>
</table>
</body></html>"#;

    fn page<P: From<PageResponse>>(url: &str, body: &str) -> P {
        P::from(PageResponse::new(url, Bytes::from(body.to_string())).unwrap())
    }

    #[test]
    fn test_extract_product() {
        let p = page::<ProductPage>("http://shop.test/product/77", PRODUCT).extract();
        assert_eq!(p.product_id.as_deref(), Some("77"));
        assert_eq!(p.name.as_deref(), Some("Chef Knife"));
        assert_eq!(p.price.as_deref(), Some("1049.50"));
        assert_eq!(p.currency.as_deref(), Some("USD"));
        assert_eq!(p.currency_raw.as_deref(), Some("$"));
        assert_eq!(p.sku.as_deref(), Some("KN-001"));
        assert_eq!(p.brand.unwrap().name, "Sharp Co");
        assert_eq!(p.availability.as_deref(), Some("InStock"));
        assert_eq!(
            p.main_image.unwrap().url,
            "http://shop.test/img/knife.jpg"
        );
        assert_eq!(p.images.len(), 2);
        assert_eq!(p.description.as_deref(), Some("Very sharp."));
        assert!(p.description_html.unwrap().starts_with("<div class=\"product-description\">"));
        assert_eq!(p.breadcrumbs.len(), 2);
        assert_eq!(p.breadcrumbs[1].name, "Kitchen");
        assert_eq!(
            p.breadcrumbs[1].url.as_deref(),
            Some("http://shop.test/category/3")
        );
        assert_eq!(p.additional_properties.len(), 2);
        assert_eq!(p.additional_properties[1].value, "20 cm");
        let rating = p.aggregate_rating.unwrap();
        assert_eq!(rating.rating_value, Some(4.5));
        assert_eq!(rating.best_rating, Some(5.0));
        assert_eq!(rating.review_count, Some(12));
    }

    #[test]
    fn test_availability_labels() {
        assert_eq!(availability("Out of stock"), "OutOfStock");
        assert_eq!(availability("SOLD OUT"), "OutOfStock");
        assert_eq!(availability("Only 3 left"), "InStock");
    }

    #[test]
    fn test_extract_product_list() {
        let body = r#"<h1>Kitchen</h1>
<div class="product-card"><a class="product-link" href="/product/1">Knife</a>
  <img src="/img/1.jpg"><span class="product-price">€15</span></div>
<div class="product-card"><a class="product-link" href="/product/2">Fork</a></div>
<a rel="next" href="/category/3?page=2">Next page</a>"#;
        let list = page::<ProductListPage>("http://shop.test/category/3", body).extract();
        assert_eq!(list.category_name.as_deref(), Some("Kitchen"));
        assert_eq!(list.products.len(), 2);
        let first = &list.products[0];
        assert_eq!(first.url.as_deref(), Some("http://shop.test/product/1"));
        assert_eq!(first.product_id.as_deref(), Some("1"));
        assert_eq!(first.name.as_deref(), Some("Knife"));
        assert_eq!(first.price.as_deref(), Some("15"));
        assert_eq!(first.currency.as_deref(), Some("EUR"));
        assert_eq!(first.main_image.as_ref().unwrap().url, "http://shop.test/img/1.jpg");
        assert!(list.products[1].price.is_none());
        let next = list.pagination_next.unwrap();
        assert_eq!(next.url, "http://shop.test/category/3?page=2");
        assert_eq!(next.text.as_deref(), Some("Next page"));
        assert_eq!(list.page_number, 1);
        assert_eq!(list.metadata.probability, Some(1.0));
    }

    #[test]
    fn test_extract_product_navigation() {
        let body = r#"<h1>Home</h1>
<a class="category-link" href="/category/1">Garden</a>
<a class="category-link" href="/category/2">Kitchen</a>
<a class="product-link" href="/product/9">Hose</a>"#;
        let nav =
            page::<ProductNavigationPage>("http://shop.test/?page=4", body).extract();
        assert_eq!(nav.category_name.as_deref(), Some("Home"));
        assert_eq!(nav.sub_categories.len(), 2);
        assert_eq!(nav.sub_categories[1].name.as_deref(), Some("Kitchen"));
        assert_eq!(nav.items[0].url, "http://shop.test/product/9");
        assert!(nav.next_page.is_none());
        assert_eq!(nav.page_number, 4);
    }
}
