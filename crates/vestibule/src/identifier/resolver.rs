//! Resolver seam to external datasources
//!
//! ORM tables, LDAP directories, and custom backends all plug in through
//! this one-method contract. The core never speaks a wire protocol itself;
//! it only asks a resolver for the first record matching a condition set.

use async_trait::async_trait;

use crate::error::Result;
use crate::record::Record;

/// How multiple conditions combine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Every condition must match
    All,
    /// Any condition may match
    Any,
}

/// A single condition value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionValue {
    /// Field equals the value
    One(String),
    /// Field matches any of the values ("IN" semantics)
    In(Vec<String>),
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        ConditionValue::One(value.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(value: String) -> Self {
        ConditionValue::One(value)
    }
}

impl From<Vec<String>> for ConditionValue {
    fn from(values: Vec<String>) -> Self {
        ConditionValue::In(values)
    }
}

/// Ordered set of field conditions for a lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions {
    entries: Vec<(String, ConditionValue)>,
}

impl Conditions {
    /// Create an empty condition set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a single-condition set
    pub fn one(field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        Self::new().with(field, value)
    }

    /// Add a condition, consuming and returning the set for chaining
    pub fn with(mut self, field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.entries.push((field.into(), value.into()));
        self
    }

    /// Iterate conditions in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConditionValue)> {
        self.entries.iter().map(|(field, value)| (field, value))
    }

    /// Check whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lookup contract implemented by external datasource backends
///
/// `find` returns the first matching record or `None`; uniqueness semantics
/// are the backend's responsibility. Backend faults surface as `Err` and are
/// isolated at the identifier-collection boundary.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Find the first record matching the conditions
    async fn find(&self, conditions: &Conditions, combinator: Combinator) -> Result<Option<Record>>;
}
