//! Opaque bearer token authentication

use async_trait::async_trait;

use crate::authenticator::{AuthResult, Authenticator, Status};
use crate::credentials::{self, Credentials};
use crate::error::Result;
use crate::identifier::IdentifierCollection;
use crate::request::Request;

/// Where a bearer token is read from on the request
#[derive(Debug, Clone)]
pub(crate) struct TokenSource {
    pub(crate) header: String,
    pub(crate) prefix: Option<String>,
    pub(crate) query_param: Option<String>,
}

impl Default for TokenSource {
    fn default() -> Self {
        Self {
            header: "Authorization".to_string(),
            prefix: Some("Bearer".to_string()),
            query_param: None,
        }
    }
}

impl TokenSource {
    /// Extract the raw token, trying the header first and then the query
    /// parameter
    ///
    /// A header that is absent, empty, or carries a different prefix does
    /// not stop the query-parameter fallback.
    pub(crate) fn extract(&self, request: &Request) -> Option<String> {
        let from_header = request
            .header(&self.header)
            .and_then(|value| match &self.prefix {
                Some(prefix) => strip_prefix_ignore_case(value, prefix),
                None => Some(value),
            })
            .filter(|token| !token.is_empty());
        if let Some(token) = from_header {
            return Some(token.to_string());
        }

        self.query_param
            .as_deref()
            .and_then(|param| request.query_param(param))
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    }
}

/// Strip `prefix` and the following space, matching case-insensitively
fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    if value.len() <= prefix.len() || !value.is_char_boundary(prefix.len()) {
        return None;
    }
    let (head, tail) = value.split_at(prefix.len());
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }

    tail.strip_prefix(' ').map(str::trim_start)
}

/// Authenticates an opaque bearer token against the identifier chain
///
/// The token is read from a header (default `Authorization: Bearer <token>`)
/// or, when configured, a query parameter, and handed to the chain under the
/// `token` credential field.
#[derive(Debug, Default)]
pub struct TokenAuthenticator {
    source: TokenSource,
}

impl TokenAuthenticator {
    /// Create an authenticator reading `Authorization: Bearer <token>`
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the header the token is read from
    pub fn header(mut self, name: impl Into<String>) -> Self {
        self.source.header = name.into();
        self
    }

    /// Replace the token prefix; `None` takes the whole header value
    pub fn token_prefix(mut self, prefix: Option<String>) -> Self {
        self.source.prefix = prefix;
        self
    }

    /// Also accept the token from this query parameter
    pub fn query_param(mut self, param: impl Into<String>) -> Self {
        self.source.query_param = Some(param.into());
        self
    }
}

#[async_trait]
impl Authenticator for TokenAuthenticator {
    async fn authenticate(
        &self,
        request: &Request,
        identifiers: &IdentifierCollection,
    ) -> Result<AuthResult> {
        let Some(token) = self.source.extract(request) else {
            return Ok(AuthResult::failure(Status::CredentialsMissing, Vec::new()));
        };

        let creds = Credentials::new().with(credentials::TOKEN, token);
        let outcome = identifiers.identify(&creds).await;
        match outcome.candidate {
            Some(identified) => Ok(AuthResult::success(identified.record)),
            None => Ok(AuthResult::failure(
                Status::IdentityNotFound,
                outcome.errors,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_from_header() {
        let source = TokenSource::default();

        let bearer = Request::builder()
            .header("Authorization", "Bearer abc123")
            .build();
        assert_eq!(source.extract(&bearer), Some("abc123".to_string()));

        // prefix match is case-insensitive
        let lower = Request::builder()
            .header("Authorization", "bearer abc123")
            .build();
        assert_eq!(source.extract(&lower), Some("abc123".to_string()));

        let wrong_prefix = Request::builder()
            .header("Authorization", "Basic abc123")
            .build();
        assert_eq!(source.extract(&wrong_prefix), None);

        let missing = Request::builder().build();
        assert_eq!(source.extract(&missing), None);
    }

    #[test]
    fn test_extraction_from_query_param() {
        let source = TokenSource {
            query_param: Some("token".to_string()),
            ..TokenSource::default()
        };

        let request = Request::builder().query_param("token", "abc123").build();
        assert_eq!(source.extract(&request), Some("abc123".to_string()));

        let empty = Request::builder().query_param("token", "").build();
        assert_eq!(source.extract(&empty), None);
    }

    #[test]
    fn test_prefix_mismatch_falls_back_to_query_param() {
        let source = TokenSource {
            query_param: Some("token".to_string()),
            ..TokenSource::default()
        };

        // a Basic header must not shadow the token in the query string
        let request = Request::builder()
            .header("Authorization", "Basic abc123")
            .query_param("token", "k-123")
            .build();
        assert_eq!(source.extract(&request), Some("k-123".to_string()));
    }

    #[tokio::test]
    async fn test_missing_token_is_credentials_missing() {
        let authenticator = TokenAuthenticator::new();
        let identifiers = IdentifierCollection::new();
        let request = Request::builder().build();

        let result = authenticator
            .authenticate(&request, &identifiers)
            .await
            .unwrap();
        assert_eq!(result.status(), Status::CredentialsMissing);
    }
}
