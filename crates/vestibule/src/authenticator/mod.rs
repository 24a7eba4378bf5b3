//! Authentication strategies
//!
//! An [`Authenticator`] extracts credentials from one surface of the
//! request (Basic transport fields, form body, bearer token) and asks the
//! identifier chain to resolve them, or resumes an identity persisted by
//! an earlier login. Strategies are tried in order by the
//! [`AuthenticationService`](crate::service::AuthenticationService).

mod basic;
mod form;
mod jwt;
mod result;
mod session;
mod token;

pub use basic::HttpBasicAuthenticator;
pub use form::FormAuthenticator;
pub use jwt::JwtAuthenticator;
pub use result::{AuthResult, Status};
pub use session::SessionAuthenticator;
pub use token::TokenAuthenticator;

use async_trait::async_trait;

use crate::error::Result;
use crate::identifier::IdentifierCollection;
use crate::request::Request;

/// Name of the challenge response header
pub const WWW_AUTHENTICATE: &str = "WWW-Authenticate";

/// An authentication challenge to send with a 401 response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    /// Value for the [`WWW_AUTHENTICATE`] header
    pub www_authenticate: String,
}

/// Strategy that authenticates one request surface
///
/// Instances are constructed once and shared across concurrent requests;
/// implementations must not keep per-request state. `Err` is reserved for
/// configuration-level problems; expected failures are [`AuthResult`]
/// values.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticate the request against the given identifier chain
    async fn authenticate(
        &self,
        request: &Request,
        identifiers: &IdentifierCollection,
    ) -> Result<AuthResult>;

    /// Challenge to issue when authentication fails and this strategy wants
    /// the client to retry with credentials
    ///
    /// Only challenge-capable strategies (HTTP Basic) override this.
    fn challenge(&self, _request: &Request) -> Option<Challenge> {
        None
    }
}
