//! json-merge-util - Leaf helpers over `serde_json::Value`
//!
//! Structural equality, deep copy, and JSON type names shared by the
//! `json-merge` merge and diff engines.

pub mod json_clone;
pub mod json_equal;
pub mod json_type;

// Re-exports for convenience
pub use json_clone::{clone, clone_object};
pub use json_equal::{deep_equal, numbers_equal};
pub use json_type::{type_name, JsonType};
