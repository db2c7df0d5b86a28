//! JSON equality utilities.
//!
//! Provides deep structural equality for JSON values.

mod deep_equal;

pub use deep_equal::{deep_equal, numbers_equal};
