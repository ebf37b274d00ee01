// switchyard/src/pipeline/definition.rs

//! Contains the `Pipeline` struct definition and methods for its construction
//! and inspection. Registration lives in `hooks`, execution in `execution`.

use crate::core::step::{StepEntry, StepKind};
use std::fmt;

/// An ordered, append-only registry of steps and recovery handlers.
///
/// Building mutates the instance in place (`&mut self -> &mut Self`). Running only
/// needs `&self`: all per-run state is local to `run()`, so one pipeline can be
/// shared across tasks and run concurrently.
#[derive(Clone, Default)]
pub struct Pipeline {
  /// Optional label attached to every tracing span of `run()`.
  pub(crate) name: Option<String>,
  /// Registration order is execution order. Never reordered.
  pub(crate) entries: Vec<StepEntry>,
}

impl Pipeline {
  /// Creates an empty, unnamed pipeline.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates an empty pipeline whose runs are labelled `name` in tracing output.
  pub fn named<S: Into<String>>(name: S) -> Self {
    Self {
      name: Some(name.into()),
      entries: Vec::new(),
    }
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Kinds of the registered entries, in registration order.
  pub fn kinds(&self) -> Vec<StepKind> {
    self.entries.iter().map(StepEntry::kind).collect()
  }

  pub(crate) fn push(&mut self, entry: StepEntry) -> &mut Self {
    self.entries.push(entry);
    self
  }

  /// Index of the first entry at or after `from` whose kind satisfies `wanted`.
  pub(crate) fn next_index(&self, from: usize, wanted: impl Fn(StepKind) -> bool) -> Option<usize> {
    self
      .entries
      .iter()
      .enumerate()
      .skip(from)
      .find(|(_, entry)| wanted(entry.kind()))
      .map(|(idx, _)| idx)
  }

  pub(crate) fn display_name(&self) -> &str {
    self.name.as_deref().unwrap_or("<unnamed>")
  }
}

impl fmt::Debug for Pipeline {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Pipeline")
      .field("name", &self.name)
      .field("entries", &self.kinds())
      .finish()
  }
}

/// Shorthand for [`Pipeline::new`].
pub fn pipeline() -> Pipeline {
  Pipeline::new()
}
