//! Identity persistence across requests
//!
//! [`Storage`] is the boundary the service persists resolved identities
//! through; [`SessionStorage`] is the provided implementation, layered on a
//! [`Session`] abstraction the surrounding framework supplies.
//! [`MemorySession`] backs tests and single-process deployments.

mod memory;
mod session;

pub use memory::MemorySession;
pub use session::SessionStorage;

use serde_json::Value;

use crate::error::Result;
use crate::record::Record;

/// Key/value session supplied by the surrounding framework
///
/// Implementations use interior mutability; one session instance belongs to
/// one request.
pub trait Session: Send + Sync {
    /// Read a value
    fn read(&self, key: &str) -> Result<Option<Value>>;

    /// Write a value
    fn write(&self, key: &str, value: Value) -> Result<()>;

    /// Delete a value
    fn delete(&self, key: &str) -> Result<()>;

    /// Rotate the session identifier, keeping the stored values
    ///
    /// Mitigates session fixation; called by [`SessionStorage`] on every
    /// identity write and delete.
    fn renew(&self) -> Result<()>;

    /// Current session identifier
    fn id(&self) -> String;
}

/// Persists the resolved identity across requests
pub trait Storage: Send + Sync {
    /// Read the persisted identity
    fn read(&self) -> Result<Option<Record>>;

    /// Persist an identity; implementations must renew the session
    /// identifier as part of the write
    fn write(&self, identity: &Record) -> Result<()>;

    /// Remove the persisted identity; implementations must renew the
    /// session identifier as part of the delete
    fn delete(&self) -> Result<()>;

    /// Read the stored post-login redirect URL
    fn redirect_url(&self) -> Result<Option<String>>;

    /// Store a post-login redirect URL, or clear it with `None`
    fn set_redirect_url(&self, url: Option<&str>) -> Result<()>;
}
