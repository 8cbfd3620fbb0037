//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! dispatcher builds `HttpRequest` values and interprets `HttpResponse`
//! values; a `Transport` implementation executes the actual I/O in between.

use std::fmt;
use std::str::FromStr;

use crate::error::DispatchError;

/// HTTP method for a request. Only these seven verbs are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Options,
        HttpMethod::Head,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }

    /// `GET` carries its parameters in the query string instead of a payload.
    pub fn sends_body(self) -> bool {
        self != HttpMethod::Get
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method names are matched exactly; `get` is not `GET`.
impl FromStr for HttpMethod {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| DispatchError::InvalidArgument(format!("Invalid HTTP method: {s}")))
    }
}

/// An HTTP request described as plain data.
///
/// Built by `RequestDispatcher::prepare`. `url` is absolute: base endpoint,
/// path and (for `GET`) the encoded query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport` after executing an `HttpRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_method_parses_from_its_name() {
        for method in HttpMethod::ALL {
            assert_eq!(method.as_str().parse::<HttpMethod>().unwrap(), method);
        }
    }

    #[test]
    fn unknown_and_lowercase_methods_are_rejected() {
        for name in ["get", "Post", "TRACE", "CONNECT", "", " GET"] {
            let err = name.parse::<HttpMethod>().unwrap_err();
            assert!(matches!(err, DispatchError::InvalidArgument(_)), "{name:?}");
        }
    }

    #[test]
    fn only_get_skips_the_payload() {
        let without: Vec<_> = HttpMethod::ALL.into_iter().filter(|m| !m.sends_body()).collect();
        assert_eq!(without, vec![HttpMethod::Get]);
    }

    #[test]
    fn success_is_any_2xx() {
        let response = |status| HttpResponse {
            status,
            status_text: String::new(),
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(response(299).is_success());
        assert!(!response(199).is_success());
        assert!(!response(301).is_success());
        assert!(!response(404).is_success());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            method: HttpMethod::Post,
            url: "http://localhost/x".to_string(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: None,
        };
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.header("accept"), None);
    }
}
