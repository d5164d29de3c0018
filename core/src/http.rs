//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The core builds `HttpRequest`
//! values and consumes `HttpResponse` values; the host (or a `Transport`
//! implementation) performs the actual round-trip. Every request against the
//! learning service is a GET, so no method is carried.

/// Header name carrying the static API credential.
pub const AUTHORIZATION: &str = "Authorization";

/// An HTTP GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data.
///
/// `url` is the final URL the body was served from. It drives schema
/// classification and may differ from the request URL after a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Convenience constructor for a 200 response with no headers.
    pub fn ok(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            url: "http://localhost/user".to_string(),
            headers: vec![("authorization".to_string(), "Token token=abc".to_string())],
        };
        assert_eq!(req.header(AUTHORIZATION), Some("Token token=abc"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn success_range() {
        let mut resp = HttpResponse::ok("http://localhost/user", "{}");
        assert!(resp.is_success());
        resp.status = 204;
        assert!(resp.is_success());
        resp.status = 401;
        assert!(!resp.is_success());
        resp.status = 302;
        assert!(!resp.is_success());
    }
}
