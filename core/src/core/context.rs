// switchyard/src/core/context.rs

//! The untyped context maps threaded through a run and the shallow merge applied
//! to them after each step or recovery handler.

use serde_json::{Map, Value};

/// Success-track state. Each step receives a snapshot of the latest value and
/// may return a partial update that is merged on top.
pub type Context = Map<String, Value>;

/// Recovery-track state. Starts empty on every run and is only extended by
/// `fail` / `fail_fast` handlers (or seeded by a failed nested pipeline).
pub type ErrorContext = Map<String, Value>;

/// Shallow merge of `update` on top of `old`.
///
/// Every key present in `update` wins, including keys whose value is `null`.
/// Keys only present in `old` are carried over. Nested objects are replaced,
/// never merged recursively.
pub fn merge(mut old: Context, update: Context) -> Context {
  for (key, value) in update {
    old.insert(key, value);
  }
  old
}

/// Like [`merge`], but an absent update returns `old` unchanged.
pub fn merge_opt(old: Context, update: Option<Context>) -> Context {
  match update {
    Some(update) => merge(old, update),
    None => old,
  }
}
