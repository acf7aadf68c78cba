//! Edge identity.
//!
//! An edge is identified by its endpoints `v -> w` plus an optional `name`, so a multigraph can
//! hold several parallel edges between the same pair of nodes.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub v: String,
    pub w: String,
    pub name: Option<String>,
}

impl EdgeKey {
    pub fn new(v: impl Into<String>, w: impl Into<String>) -> Self {
        Self {
            v: v.into(),
            w: w.into(),
            name: None,
        }
    }

    pub fn named(v: impl Into<String>, w: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            v: v.into(),
            w: w.into(),
            name: Some(name.into()),
        }
    }

    /// Returns the endpoint opposite to `node`.
    pub fn other(&self, node: &str) -> &str {
        if self.v == node { &self.w } else { &self.v }
    }

    pub fn is_self_loop(&self) -> bool {
        self.v == self.w
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} -> {} ({name})", self.v, self.w),
            None => write!(f, "{} -> {}", self.v, self.w),
        }
    }
}

/// Borrowed lookup key. Field order and types hash identically to [`EdgeKey`], which lets map
/// lookups avoid allocating owned strings.
#[derive(Clone, Copy, Hash)]
pub(crate) struct EdgeKeyRef<'a> {
    pub(crate) v: &'a str,
    pub(crate) w: &'a str,
    pub(crate) name: Option<&'a str>,
}

impl indexmap::Equivalent<EdgeKey> for EdgeKeyRef<'_> {
    fn equivalent(&self, key: &EdgeKey) -> bool {
        key.v == self.v && key.w == self.w && key.name.as_deref() == self.name
    }
}

impl EdgeKeyRef<'_> {
    pub(crate) fn to_owned_key(self) -> EdgeKey {
        EdgeKey {
            v: self.v.to_string(),
            w: self.w.to_string(),
            name: self.name.map(str::to_string),
        }
    }
}
