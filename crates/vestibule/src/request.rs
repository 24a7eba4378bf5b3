//! Request boundary
//!
//! The web framework owns the real request/response objects; the pipeline
//! only needs read access to a few surfaces of an inbound request. The
//! transport layer builds a [`Request`] per inbound call: headers, parsed
//! body fields, query parameters, and server/transport parameters such as
//! the credentials parsed from an `Authorization: Basic` header.

use std::collections::BTreeMap;

/// Server parameter holding the username parsed from Basic auth
pub const AUTH_USER: &str = "AUTH_USER";
/// Server parameter holding the password parsed from Basic auth
pub const AUTH_PW: &str = "AUTH_PW";
/// Server parameter holding the server's host name, used as the default
/// Basic auth realm
pub const SERVER_NAME: &str = "SERVER_NAME";

/// Read-only view of an inbound web request
#[derive(Debug, Clone, Default)]
pub struct Request {
    path: String,
    headers: BTreeMap<String, String>,
    body: BTreeMap<String, String>,
    query: BTreeMap<String, String>,
    server: BTreeMap<String, String>,
}

impl Request {
    /// Start building a request view
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    /// Request path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get a header value; names are matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Get a parsed body field
    pub fn body_field(&self, name: &str) -> Option<&str> {
        self.body.get(name).map(String::as_str)
    }

    /// Get a query parameter
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Get a server/transport parameter
    pub fn server_param(&self, name: &str) -> Option<&str> {
        self.server.get(name).map(String::as_str)
    }
}

/// Builder for [`Request`]
#[derive(Debug, Default)]
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    /// Set the request path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.request.path = path.into();
        self
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request
            .headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Add a parsed body field
    pub fn body_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.body.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.insert(name.into(), value.into());
        self
    }

    /// Add a server/transport parameter
    pub fn server_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.server.insert(name.into(), value.into());
        self
    }

    /// Finish building
    pub fn build(self) -> Request {
        self.request
    }
}
