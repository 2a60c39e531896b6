//! Async HTTP client wrapping reqwest.
//!
//! One GET per call, no retries and no timeout. Captures everything the
//! extract handler may need to echo back: status, every header, the raw
//! body bytes and the charset the response declared.

use bytes::Bytes;
use encoding_rs::{Encoding, UTF_8};

/// Response from an HTTP GET request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// All response headers. Values sharing a name are adjacent.
    pub headers: Vec<(String, String)>,
    /// Raw response body.
    pub body: Bytes,
    /// `charset` parameter of the Content-Type header, if any.
    pub charset: Option<String>,
}

impl HttpResponse {
    /// Decode the body with the declared charset, falling back to UTF-8.
    ///
    /// Malformed sequences are replaced rather than rejected.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.charset.as_deref())
    }
}

/// Decode `body` using the encoding named by `charset`.
///
/// Unknown or missing labels decode as UTF-8. A byte-order mark is kept
/// as text and never overrides the declared charset.
pub fn decode_body(body: &[u8], charset: Option<&str>) -> String {
    let encoding = charset
        .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
        .unwrap_or(UTF_8);
    let (text, _) = encoding.decode_without_bom_handling(body);
    text.into_owned()
}

/// Pull the `charset` parameter out of a Content-Type value.
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    let parsed: mime::Mime = content_type.parse().ok()?;
    parsed
        .get_param(mime::CHARSET)
        .map(|charset| charset.as_str().to_string())
}

/// HTTP client used for the single outbound fetch of each extract request.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client identifying itself as this crate.
    pub fn new() -> Result<Self, reqwest::Error> {
        let ua = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder().user_agent(ua).build()?;
        Ok(Self { client })
    }

    /// Perform a single GET request and read the whole body.
    ///
    /// Non-2xx statuses are not errors; only transport failures are.
    /// Headers come back grouped by name, lowercased, since `HeaderMap`
    /// does not keep wire order.
    pub async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
        let r = self.client.get(url).send().await?;
        let status = r.status().as_u16();

        let headers: Vec<(String, String)> = r
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();

        let charset = r
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_from_content_type);

        let body = r.bytes().await?;
        tracing::debug!(url, status, bytes = body.len(), "fetched page");

        Ok(HttpResponse {
            status,
            headers,
            body,
            charset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_creation() {
        assert!(HttpClient::new().is_ok());
    }

    #[test]
    fn test_charset_from_content_type() {
        let charset = charset_from_content_type("text/html; charset=ISO-8859-1").unwrap();
        assert!(charset.eq_ignore_ascii_case("iso-8859-1"));
        assert_eq!(charset_from_content_type("text/html"), None);
        assert_eq!(charset_from_content_type("not a mime type"), None);
    }

    #[test]
    fn test_decode_body_with_charset() {
        let latin1 = b"caf\xe9";
        assert_eq!(decode_body(latin1, Some("iso-8859-1")), "café");
    }

    #[test]
    fn test_decode_body_defaults_to_utf8() {
        assert_eq!(decode_body("Bogotá".as_bytes(), None), "Bogotá");
        assert_eq!(decode_body("Bogotá".as_bytes(), Some("no-such-charset")), "Bogotá");
    }

    #[test]
    fn test_decode_body_replaces_invalid_utf8() {
        assert_eq!(decode_body(b"ok\xff", None), "ok\u{fffd}");
    }

    #[test]
    fn test_decode_body_keeps_bom_under_latin1_label() {
        assert_eq!(
            decode_body(b"\xef\xbb\xbfhi", Some("iso-8859-1")),
            "\u{ef}\u{bb}\u{bf}hi"
        );
    }

    #[test]
    fn test_decode_body_keeps_bom_under_utf8_label() {
        assert_eq!(decode_body(b"\xef\xbb\xbfhi", Some("utf-8")), "\u{feff}hi");
        assert_eq!(decode_body(b"\xef\xbb\xbfhi", None), "\u{feff}hi");
    }

    #[test]
    fn test_response_text_uses_declared_charset() {
        let resp = HttpResponse {
            status: 200,
            headers: vec![],
            body: Bytes::from_static(b"na\xefve"),
            charset: Some("windows-1252".to_string()),
        };
        assert_eq!(resp.text(), "naïve");
    }
}
