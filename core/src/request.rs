//! Caller-facing request description and its validation.
//!
//! A `RequestSpec` is deliberately loose: the method is free text and the
//! body is any JSON value, so a bad call site is caught by `validate` rather
//! than by the type system. Nothing is sent until validation passes.

use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::error::DispatchError;
use crate::http::HttpMethod;

/// One request to issue against the dispatcher's base endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: String,
    pub path: String,
    pub body: Value,
}

impl RequestSpec {
    /// A `GET` with an empty parameter object.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get.as_str().to_string(),
            path: path.into(),
            body: Value::Object(Map::new()),
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Check the method against the verb set and require an object body.
    ///
    /// The object's contents are not inspected.
    pub fn validate(&self) -> Result<(HttpMethod, &Map<String, Value>), DispatchError> {
        let method: HttpMethod = self.method.parse()?;
        let body = self.body.as_object().ok_or_else(|| {
            DispatchError::InvalidArgument("Request data must be a valid JSON object".to_string())
        })?;
        Ok((method, body))
    }
}

/// Flatten a body object into an `application/x-www-form-urlencoded` query.
///
/// Strings are encoded verbatim; every other value is encoded as its
/// compact JSON text (`1`, `true`, `null`, `[1,2]`).
pub fn encode_query(body: &Map<String, Value>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in body {
        match value {
            Value::String(text) => serializer.append_pair(key, text),
            other => serializer.append_pair(key, &other.to_string()),
        };
    }
    serializer.finish()
}

/// Join the base endpoint and a path. A trailing `/` on the base is dropped
/// when the path brings its own leading `/`.
pub fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{path}", base_url.trim_end_matches('/'))
    } else {
        format!("{base_url}{path}")
    }
}

/// Append an encoded query to a URL, respecting a query already present.
pub fn append_query(url: &mut String, query: &str) {
    if query.is_empty() {
        return;
    }
    url.push(if url.contains('?') { '&' } else { '?' });
    url.push_str(query);
}
