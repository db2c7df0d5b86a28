//! JSON cloning utilities.
//!
//! Provides the deep copy used when a merge must not alias its target.

mod clone;

pub use clone::{clone, clone_object};
