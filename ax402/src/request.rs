//! The outbound request specification.
//!
//! A [`PaymentRequestSpec`] is the immutable input to one payment-retry
//! invocation. It deserializes directly from the argument object an agent
//! action receives, with `method` defaulting to `GET`.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// HTTP method of an outbound request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET (the default).
    #[default]
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP DELETE.
    Delete,
}

impl HttpMethod {
    /// Returns the canonical upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound HTTP request that may require payment.
///
/// Attempted at most twice: once unauthenticated, and once with a payment
/// proof header if the first attempt returned `402 Payment Required`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequestSpec {
    /// Absolute URL of the resource.
    pub url: Url,

    /// HTTP method, defaulting to GET.
    #[serde(default)]
    pub method: HttpMethod,

    /// Request body, passed through unmodified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Extra request headers, merged over the JSON content-type default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

impl PaymentRequestSpec {
    /// Creates a GET request spec for the given URL.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            method: HttpMethod::default(),
            body: None,
            headers: None,
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub const fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a request header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_defaults_to_get() {
        let spec: PaymentRequestSpec =
            serde_json::from_str(r#"{"url":"https://api.example.com/data"}"#).unwrap();
        assert_eq!(spec.method, HttpMethod::Get);
        assert!(spec.body.is_none());
        assert!(spec.headers.is_none());
    }

    #[test]
    fn test_method_parses_uppercase() {
        let spec: PaymentRequestSpec = serde_json::from_str(
            r#"{"url":"https://api.example.com/data","method":"DELETE","body":"{}"}"#,
        )
        .unwrap();
        assert_eq!(spec.method, HttpMethod::Delete);
        assert_eq!(spec.body.as_deref(), Some("{}"));
    }

    #[test]
    fn test_relative_url_rejected() {
        let result = serde_json::from_str::<PaymentRequestSpec>(r#"{"url":"/data"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_headers() {
        let url = Url::parse("https://api.example.com/data").unwrap();
        let spec = PaymentRequestSpec::new(url)
            .with_method(HttpMethod::Post)
            .with_body(r#"{"q":1}"#)
            .with_header("Authorization", "Bearer t");
        assert_eq!(
            spec.headers.unwrap().get("Authorization").map(String::as_str),
            Some("Bearer t")
        );
    }
}
