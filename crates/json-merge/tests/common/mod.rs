#![allow(dead_code)]

use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Installs a test subscriber honouring `RUST_LOG`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn parse(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|e| panic!("bad fixture {text:?}: {e}"))
}
