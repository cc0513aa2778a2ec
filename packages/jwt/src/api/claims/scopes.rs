//! Insertion-ordered scope toggle set

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Duplicate-free set of permission strings that remembers the order in
/// which scopes were added.
///
/// Toggling a present scope removes it and keeps the relative order of the
/// rest, so an even number of toggles leaves a scope out and an odd number
/// leaves it in at the position of its last addition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeSet {
    scopes: IndexSet<String>,
}

impl ScopeSet {
    /// Empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the scope if absent, remove it if present.
    ///
    /// Returns whether the scope is in the set afterwards.
    pub fn toggle(&mut self, scope: impl Into<String>) -> bool {
        let scope = scope.into();
        if self.scopes.shift_remove(&scope) {
            false
        } else {
            self.scopes.insert(scope);
            true
        }
    }

    /// Add the scope at the end unless already present.
    ///
    /// Returns `true` if it was newly added.
    pub fn insert(&mut self, scope: impl Into<String>) -> bool {
        self.scopes.insert(scope.into())
    }

    /// Whether the scope is selected
    #[must_use]
    pub fn contains(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }

    /// Number of selected scopes
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Selected scopes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }

    /// Selected scopes as an ordered sequence
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.scopes.into_iter().collect()
    }
}

// Order matters: two sets holding the same scopes added in different
// sequences render different `scp` claims.
impl PartialEq for ScopeSet {
    fn eq(&self, other: &Self) -> bool {
        self.scopes.iter().eq(other.scopes.iter())
    }
}

impl Eq for ScopeSet {}

/// Collecting applies each item as a toggle, in iteration order.
impl<S: Into<String>> FromIterator<S> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ScopeSet::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for ScopeSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for scope in iter {
            self.toggle(scope);
        }
    }
}
