//! JSON Merge Patch (RFC 7386).
//!
//! A merge patch describes a change to a JSON document by example: object
//! members are merged recursively, `null` deletes a member, and every other
//! value (arrays included) replaces what was there.
//!
//! The engines work on [`Value`]. The document-level functions accept any
//! [`Document`] representation and hand results back in the same one:
//!
//! ```
//! use serde_json::json;
//! use json_merge::{generate, merge};
//!
//! let target = json!({"title": "Goodbye!", "author": {"givenName": "John", "familyName": "Doe"}});
//! let patch = json!({"title": "Hello!", "author": {"familyName": null}});
//!
//! let merged = merge(&target, &patch).unwrap();
//! assert_eq!(*merged, json!({"title": "Hello!", "author": {"givenName": "John"}}));
//!
//! assert_eq!(generate(&target, merged.doc()).unwrap(), patch);
//! ```
//!
//! # Modules
//!
//! - `merge`: apply a patch ([`apply_patch`], [`apply_patch_mut`])
//! - `diff`: generate a patch ([`generate_patch`])
//! - `document`: conversions between caller documents and [`Value`]
//! - `isolation`: copy or mutate the merge target

pub mod api;
pub mod diff;
pub mod document;
pub mod error;
pub mod isolation;
pub mod merge;

pub use api::{generate, merge, merge_in_place, merge_many, merge_with, valid, MEDIA_TYPE};
pub use diff::generate_patch;
pub use document::{Document, Record, ToCanonical};
pub use error::{Error, ErrorKind, Role};
pub use isolation::{Isolation, MergeOptions, Merged};
pub use json_merge_util::deep_equal;
pub use merge::{apply_patch, apply_patch_mut};
pub use serde_json::{Map, Value};
