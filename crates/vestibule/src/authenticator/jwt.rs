//! Signed token (JWT) authentication

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;

use crate::authenticator::token::TokenSource;
use crate::authenticator::{AuthResult, Authenticator, Status};
use crate::credentials::Credentials;
use crate::error::Result;
use crate::identifier::IdentifierCollection;
use crate::record::Record;
use crate::request::Request;

/// Authenticates a signed bearer token
///
/// The token is extracted like an opaque bearer token, then its signature
/// and registered claims (`exp`) are verified before anything else happens.
/// A token that fails verification is a [`Status::CredentialInvalid`]
/// failure, distinct from an unknown identity.
///
/// With `return_payload` (the default) the verified claims become the
/// identity directly; otherwise the string claims are handed to the
/// identifier chain, which typically resolves `sub` against a user table.
pub struct JwtAuthenticator {
    source: TokenSource,
    decoding_key: DecodingKey,
    validation: Validation,
    return_payload: bool,
}

impl JwtAuthenticator {
    /// Create an authenticator verifying HS256 tokens with the given
    /// symmetric secret
    pub fn new(secret: &[u8]) -> Self {
        Self {
            source: TokenSource::default(),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            return_payload: true,
        }
    }

    /// Replace the accepted signing algorithms
    pub fn algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.validation.algorithms = algorithms;
        self
    }

    /// Replace the header the token is read from
    pub fn header(mut self, name: impl Into<String>) -> Self {
        self.source.header = name.into();
        self
    }

    /// Also accept the token from this query parameter
    pub fn query_param(mut self, param: impl Into<String>) -> Self {
        self.source.query_param = Some(param.into());
        self
    }

    /// Whether verified claims are returned directly as the identity
    /// instead of being resolved through the identifier chain
    pub fn return_payload(mut self, return_payload: bool) -> Self {
        self.return_payload = return_payload;
        self
    }

    fn claims_to_credentials(claims: &Value) -> Credentials {
        let mut creds = Credentials::new();
        if let Value::Object(map) = claims {
            for (key, value) in map {
                if let Value::String(value) = value {
                    creds.insert(key.clone(), value.clone());
                }
            }
        }
        creds
    }
}

#[async_trait]
impl Authenticator for JwtAuthenticator {
    async fn authenticate(
        &self,
        request: &Request,
        identifiers: &IdentifierCollection,
    ) -> Result<AuthResult> {
        let Some(token) = self.source.extract(request) else {
            return Ok(AuthResult::failure(Status::CredentialsMissing, Vec::new()));
        };

        let claims = match decode::<Value>(&token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(error) => {
                return Ok(AuthResult::failure(
                    Status::CredentialInvalid,
                    vec![error.to_string()],
                ));
            }
        };

        if self.return_payload {
            let Value::Object(map) = claims else {
                return Ok(AuthResult::failure(
                    Status::CredentialInvalid,
                    vec!["Token payload is not an object".to_string()],
                ));
            };
            let identity: Record = map.into_iter().collect();

            return Ok(AuthResult::success(identity));
        }

        let creds = Self::claims_to_credentials(&claims);
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
