// switchyard/src/error.rs
use crate::core::step::StepKind;
use anyhow::Error as AnyhowError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwitchyardError {
  /// A `fail` or `fail_fast` handler returned an error. These are never routed
  /// into recovery; the whole run is aborted without producing an `Outcome`.
  #[error("{kind} handler at index {index} failed. Source: {source}")]
  HandlerFailure {
    index: usize,
    kind: StepKind,
    #[source]
    source: AnyhowError,
  },

  #[error("Context update must be a JSON object or null, found {found}")]
  InvalidUpdate { found: &'static str },

  #[error("Internal switchyard error: pipeline run ended without reaching a terminal state")]
  Unreachable,
}

pub type SwitchyardResult<T, E = SwitchyardError> = std::result::Result<T, E>;

/// The error captured from the first failing step of a run.
///
/// The engine treats it as opaque: it is recorded once and forwarded to every
/// recovery handler and into `Outcome::Failure`. Cloning is cheap (shared `Arc`).
#[derive(Clone)]
pub struct StepError(Arc<AnyhowError>);

impl StepError {
  pub fn new(err: AnyhowError) -> Self {
    StepError(Arc::new(err))
  }

  /// Top-level message of the wrapped error.
  pub fn message(&self) -> String {
    self.0.to_string()
  }

  pub fn inner(&self) -> &AnyhowError {
    &self.0
  }

  pub fn downcast_ref<E>(&self) -> Option<&E>
  where
    E: fmt::Display + fmt::Debug + Send + Sync + 'static,
  {
    self.0.downcast_ref::<E>()
  }

  /// True when both handles point at the same recorded error.
  pub fn ptr_eq(&self, other: &StepError) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }
}

impl From<AnyhowError> for StepError {
  fn from(err: AnyhowError) -> Self {
    StepError::new(err)
  }
}

impl fmt::Debug for StepError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(&*self.0, f)
  }
}

impl fmt::Display for StepError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&*self.0, f)
  }
}

impl std::error::Error for StepError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    self.0.source()
  }
}
