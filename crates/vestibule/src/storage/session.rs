//! Session-backed identity storage

use serde_json::Value;

use crate::error::Result;
use crate::record::Record;
use crate::storage::{Session, Storage};

const IDENTITY_KEY: &str = "Auth.identity";
const REDIRECT_KEY: &str = "Auth.redirect";

/// Stores the resolved identity in the request's session
///
/// The session identifier is renewed inside every `write` and `delete` so a
/// pre-login session id can never name an authenticated session.
pub struct SessionStorage<S: Session> {
    session: S,
    identity_key: String,
    redirect_key: String,
}

impl<S: Session> SessionStorage<S> {
    /// Wrap a session with the default storage keys
    pub fn new(session: S) -> Self {
        Self {
            session,
            identity_key: IDENTITY_KEY.to_string(),
            redirect_key: REDIRECT_KEY.to_string(),
        }
    }

    /// Replace the session key the identity is stored under
    pub fn identity_key(mut self, key: impl Into<String>) -> Self {
        self.identity_key = key.into();
        self
    }

    /// Replace the session key the redirect URL is stored under
    pub fn redirect_key(mut self, key: impl Into<String>) -> Self {
        self.redirect_key = key.into();
        self
    }

    /// Access the underlying session
    pub fn session(&self) -> &S {
        &self.session
    }
}

impl<S: Session> Storage for SessionStorage<S> {
    fn read(&self) -> Result<Option<Record>> {
        match self.session.read(&self.identity_key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn write(&self, identity: &Record) -> Result<()> {
        self.session.renew()?;
        self.session
            .write(&self.identity_key, serde_json::to_value(identity)?)
    }

    fn delete(&self) -> Result<()> {
        self.session.delete(&self.identity_key)?;
        self.session.renew()
    }

    fn redirect_url(&self) -> Result<Option<String>> {
        Ok(self
            .session
            .read(&self.redirect_key)?
            .and_then(|value| match value {
                Value::String(url) => Some(url),
                _ => None,
            }))
    }

    fn set_redirect_url(&self, url: Option<&str>) -> Result<()> {
        match url {
            Some(url) => self
                .session
                .write(&self.redirect_key, Value::String(url.to_string())),
            None => self.session.delete(&self.redirect_key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySession;

    fn storage() -> SessionStorage<MemorySession> {
        SessionStorage::new(MemorySession::new())
    }

    #[test]
    fn test_write_read_delete() {
        let storage = storage();
        let identity = Record::new().with("id", 1).with("username", "ada");

        assert!(storage.read().unwrap().is_none());

        storage.write(&identity).unwrap();
        assert_eq!(storage.read().unwrap(), Some(identity));

        storage.delete().unwrap();
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn test_write_and_delete_each_renew_once() {
        let storage = storage();
        let identity = Record::new().with("id", 1);

        let before = storage.session().id();
        storage.write(&identity).unwrap();
        let after_write = storage.session().id();
        assert_ne!(before, after_write);
        assert_eq!(storage.session().renewals(), 1);

        storage.delete().unwrap();
        assert_ne!(after_write, storage.session().id());
        assert_eq!(storage.session().renewals(), 2);
    }

    #[test]
    fn test_renewal_keeps_identity_readable() {
        let storage = storage();
        let identity = Record::new().with("id", 1);

        storage.write(&identity).unwrap();
        // the rotated session still holds the freshly written identity
        assert_eq!(storage.read().unwrap(), Some(identity));
    }

    #[test]
    fn test_redirect_url() {
        let storage = storage();

        assert!(storage.redirect_url().unwrap().is_none());

        storage.set_redirect_url(Some("/dashboard")).unwrap();
        assert_eq!(
            storage.redirect_url().unwrap(),
            Some("/dashboard".to_string())
        );
        // storing the redirect does not rotate the session
        assert_eq!(storage.session().renewals(), 0);

        storage.set_redirect_url(None).unwrap();
        assert!(storage.redirect_url().unwrap().is_none());
    }

    #[test]
    fn test_custom_keys() {
        let storage = SessionStorage::new(MemorySession::new())
            .identity_key("App.user")
            .redirect_key("App.redirect");
        let identity = Record::new().with("id", 1);

        storage.write(&identity).unwrap();
        assert!(storage.session().read("App.user").unwrap().is_some());
        assert!(storage.session().read("Auth.identity").unwrap().is_none());
    }
}
