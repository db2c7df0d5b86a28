//! Isolation policy: whether a merge works on a copy or on the target.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// How a merge treats its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Isolation {
    /// Merge into a deep copy. The target is never observed to change and
    /// the result shares nothing with it.
    #[default]
    Copy,
    /// Merge directly into the target's existing containers. Nothing else
    /// may access the target until the call returns.
    Mutate,
}

/// Options for [`merge_with`](crate::merge_with).
///
/// Derives `serde` traits so it can sit inside a caller's own configuration;
/// missing fields take their defaults.
///
/// ```
/// use json_merge::{Isolation, MergeOptions};
///
/// let options: MergeOptions = serde_json::from_str(r#"{"mutate": true}"#).unwrap();
/// assert_eq!(options.isolation(), Isolation::Mutate);
/// assert_eq!(MergeOptions::default().isolation(), Isolation::Copy);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Modify the target in place instead of merging into a copy.
    pub mutate: bool,
}

impl MergeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mutate(mut self, mutate: bool) -> Self {
        self.mutate = mutate;
        self
    }

    pub fn isolation(&self) -> Isolation {
        if self.mutate {
            Isolation::Mutate
        } else {
            Isolation::Copy
        }
    }
}

impl From<Isolation> for MergeOptions {
    fn from(isolation: Isolation) -> Self {
        Self {
            mutate: isolation == Isolation::Mutate,
        }
    }
}

// ── Merged ────────────────────────────────────────────────────────────────

/// The result of a merge, in the same representation as the target.
///
/// Under [`Isolation::Copy`] it owns an independent document. Under
/// [`Isolation::Mutate`] it borrows the target the merge was written into.
pub struct Merged<'a, T> {
    doc: Slot<'a, T>,
}

enum Slot<'a, T> {
    Owned(T),
    Target(&'a T),
}

impl<'a, T> Merged<'a, T> {
    pub(crate) fn owned(doc: T) -> Self {
        Self {
            doc: Slot::Owned(doc),
        }
    }

    pub(crate) fn target(doc: &'a T) -> Self {
        Self {
            doc: Slot::Target(doc),
        }
    }

    pub fn doc(&self) -> &T {
        match &self.doc {
            Slot::Owned(doc) => doc,
            Slot::Target(doc) => *doc,
        }
    }

    /// False when the result is the caller's own, mutated target.
    pub fn is_independent(&self) -> bool {
        matches!(self.doc, Slot::Owned(_))
    }

    /// Returns the owned document, cloning it out of the target under
    /// mutate isolation.
    pub fn into_doc(self) -> T
    where
        T: Clone,
    {
        match self.doc {
            Slot::Owned(doc) => doc,
            Slot::Target(doc) => doc.clone(),
        }
    }
}

impl<T> Deref for Merged<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.doc()
    }
}

impl<T> AsRef<T> for Merged<'_, T> {
    fn as_ref(&self) -> &T {
        self.doc()
    }
}

impl<T: fmt::Debug> fmt::Debug for Merged<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Merged")
            .field("doc", self.doc())
            .field("independent", &self.is_independent())
            .finish()
    }
}
