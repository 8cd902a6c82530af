//! Identifier issuance
//!
//! Every descriptor receives an [`Id`] at construction, issued by the
//! [`IdRegistry`] owned by the [`Ui`](crate::Ui) context.

use std::cell::Cell;
use std::fmt;

/// Opaque component identifier, also stamped on the surface node as `id`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(String);

impl Id {
    /// Wrap an explicit identifier (used by `set_id` overrides)
    pub fn new(id: impl Into<String>) -> Self {
        Id(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Id(id.to_string())
    }
}

impl From<String> for Id {
    fn from(id: String) -> Self {
        Id(id)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Monotonic identifier source
///
/// The counter starts at zero and only grows; there is no reset. Create a new
/// registry to start a fresh sequence.
#[derive(Debug)]
pub struct IdRegistry {
    prefix: String,
    next: Cell<u64>,
}

impl IdRegistry {
    /// Create a registry issuing `<prefix>0`, `<prefix>1`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        IdRegistry {
            prefix: prefix.into(),
            next: Cell::new(0),
        }
    }

    /// Issue the next identifier
    pub fn issue(&self) -> Id {
        let n = self.next.get();
        self.next.set(n + 1);
        Id(format!("{}{}", self.prefix, n))
    }

    /// Number of identifiers issued so far
    pub fn issued(&self) -> u64 {
        self.next.get()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for IdRegistry {
    fn default() -> Self {
        IdRegistry::new("kd")
    }
}
