//! Page objects for the articles fixture website.

use super::html::{self, element_text};
use super::items::{Article, ArticleNavigation, Author, Item, Metadata};
use super::{ExtractionError, PageObject, PageResponse};
use async_trait::async_trait;
use scraper::Html;

/// Split a byline such as `By Jane Doe` into a clean name.
fn author(name_raw: String) -> Author {
    let trimmed = name_raw
        .strip_prefix("By ")
        .or_else(|| name_raw.strip_prefix("by "))
        .unwrap_or(&name_raw)
        .trim();
    Author {
        name: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        name_raw,
    }
}

/// Extracts an [`Article`] from an article page.
pub struct ArticlePage {
    response: PageResponse,
}

impl From<PageResponse> for ArticlePage {
    fn from(response: PageResponse) -> Self {
        Self { response }
    }
}

impl ArticlePage {
    pub fn extract(&self) -> Article {
        let url = &self.response.url;
        let doc = Html::parse_document(&self.response.text());
        let root = doc.root_element();

        let date_published_raw = html::first_text(root, ".article-date");
        let body_el = html::first(root, ".article-body");
        let images = html::images(&doc, ".article-body img", url);

        Article {
            url: self.response.raw_url.clone(),
            headline: html::first_text(root, "h1"),
            date_published: date_published_raw.as_deref().and_then(html::parse_date),
            date_published_raw,
            authors: html::all_texts(root, ".article-author")
                .into_iter()
                .map(author)
                .collect(),
            description: html::first_attr(root, r#"meta[name="description"]"#, "content"),
            article_body: body_el.as_ref().and_then(element_text),
            article_body_html: body_el.map(|el| el.html()),
            main_image: images.first().cloned(),
            images,
            breadcrumbs: html::breadcrumbs(&doc, url),
            metadata: Metadata::with_probability(),
        }
    }
}

#[async_trait]
impl PageObject for ArticlePage {
    async fn to_item(&self) -> Result<Item, ExtractionError> {
        Ok(Item::Article(self.extract()))
    }
}

/// Extracts article and subcategory links from an article listing.
pub struct ArticleNavigationPage {
    response: PageResponse,
}

impl From<PageResponse> for ArticleNavigationPage {
    fn from(response: PageResponse) -> Self {
        Self { response }
    }
}

impl ArticleNavigationPage {
    pub fn extract(&self) -> ArticleNavigation {
        let url = &self.response.url;
        let doc = Html::parse_document(&self.response.text());

        ArticleNavigation {
            url: self.response.raw_url.clone(),
            category_name: html::first_text(doc.root_element(), "h1"),
            sub_categories: html::link_requests(&doc, "a.category-link[href]", url),
            items: html::link_requests(&doc, "a.article-link[href]", url),
            next_page: html::next_page_request(&doc, url),
            page_number: html::page_number(url),
            metadata: Metadata::navigation(),
        }
    }
}

#[async_trait]
impl PageObject for ArticleNavigationPage {
    async fn to_item(&self) -> Result<Item, ExtractionError> {
        Ok(Item::ArticleNavigation(self.extract()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn page<P: From<PageResponse>>(url: &str, body: &str) -> P {
        P::from(PageResponse::new(url, Bytes::from(body.to_string())).unwrap())
    }

    #[test]
    fn test_extract_article() {
        let body = r#"<html><head><meta name="description" content="Short summary"></head>
<body>
<ol class="breadcrumb"><li><a href="/">Home</a></li><li><a href="/category/2">Science</a></li></ol>
<h1>Moons of Jupiter</h1>
<span class="article-author">By Ada Byron</span>
<span class="article-author">Grace Hopper</span>
<time class="article-date">March 1, 2024</time>
<div class="article-body"><p>Io is volcanic.</p><img src="/img/io.png"><p>Europa
  has ice.</p></div>
</body></html>"#;
        let a = page::<ArticlePage>("http://news.test/article/5", body).extract();
        assert_eq!(a.headline.as_deref(), Some("Moons of Jupiter"));
        assert_eq!(a.date_published.as_deref(), Some("2024-03-01T00:00:00Z"));
        assert_eq!(a.authors.len(), 2);
        assert_eq!(a.authors[0].name.as_deref(), Some("Ada Byron"));
        assert_eq!(a.authors[0].name_raw, "By Ada Byron");
        assert_eq!(a.authors[1].name.as_deref(), Some("Grace Hopper"));
        assert_eq!(a.description.as_deref(), Some("Short summary"));
        assert_eq!(a.article_body.as_deref(), Some("Io is volcanic.Europa has ice."));
        assert_eq!(a.main_image.unwrap().url, "http://news.test/img/io.png");
        assert_eq!(a.breadcrumbs.len(), 2);
    }

    #[test]
    fn test_extract_article_navigation() {
        let body = r#"<h1>Science</h1>
<a class="category-link" href="/category/7">Space</a>
<a class="article-link" href="/article/5">Moons of Jupiter</a>
<a class="article-link" href="/article/6">Rings of Saturn</a>
<a href="/category/2?page=2">Next</a>"#;
        let nav =
            page::<ArticleNavigationPage>("http://news.test/category/2", body).extract();
        assert_eq!(nav.category_name.as_deref(), Some("Science"));
        assert_eq!(nav.sub_categories.len(), 1);
        assert_eq!(nav.items.len(), 2);
        assert_eq!(nav.items[1].name.as_deref(), Some("Rings of Saturn"));
        assert_eq!(
            nav.next_page.unwrap().url,
            "http://news.test/category/2?page=2"
        );
        assert_eq!(nav.page_number, 1);
    }
}
