// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use parking_lot::Mutex;
use serde_json::Value;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use switchyard::Context;
use tracing::Level;

// --- Context helpers ---

/// Builds a `Context` from a `json!` object literal.
pub fn ctx(value: Value) -> Context {
  match value {
    Value::Object(map) => map,
    other => panic!("test context must be a JSON object, got {other}"),
  }
}

pub fn as_value(map: &Context) -> Value {
  Value::Object(map.clone())
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Test step failed: {0}")]
  Step(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

// --- Spies ---

/// Call counter standing in for a mock function.
#[derive(Clone, Default)]
pub struct Spy(Arc<AtomicUsize>);

impl Spy {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn hit(&self) {
    self.0.fetch_add(1, Ordering::SeqCst);
  }

  pub fn calls(&self) -> usize {
    self.0.load(Ordering::SeqCst)
  }
}

/// Shared, ordered log of which callbacks ran.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&self, entry: &str) {
    self.0.lock().push(entry.to_string());
  }

  pub fn entries(&self) -> Vec<String> {
    self.0.lock().clone()
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::TRACE)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
