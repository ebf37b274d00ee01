// switchyard/src/core/outcome.rs

//! The single value a run resolves to, and the marker used to pass it through a
//! composed step.

use crate::core::context::{Context, ErrorContext};
use crate::error::StepError;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Outcome of a full pipeline run. Produced exactly once per `run()`.
#[derive(Debug, Clone)]
pub enum Outcome {
  /// Every step ran (or none were registered); `ctx` is the final context.
  Success { ctx: Context },
  /// A step failed. `error` is the first failure, `error_ctx` what the recovery
  /// handlers accumulated.
  Failure { error: StepError, error_ctx: ErrorContext },
}

impl Outcome {
  pub fn success(ctx: Context) -> Self {
    Outcome::Success { ctx }
  }

  pub fn failure(error: StepError, error_ctx: ErrorContext) -> Self {
    Outcome::Failure { error, error_ctx }
  }

  pub fn is_ok(&self) -> bool {
    matches!(self, Outcome::Success { .. })
  }

  pub fn is_err(&self) -> bool {
    !self.is_ok()
  }

  pub fn ctx(&self) -> Option<&Context> {
    match self {
      Outcome::Success { ctx } => Some(ctx),
      Outcome::Failure { .. } => None,
    }
  }

  pub fn error(&self) -> Option<&StepError> {
    match self {
      Outcome::Success { .. } => None,
      Outcome::Failure { error, .. } => Some(error),
    }
  }

  pub fn error_ctx(&self) -> Option<&ErrorContext> {
    match self {
      Outcome::Success { .. } => None,
      Outcome::Failure { error_ctx, .. } => Some(error_ctx),
    }
  }

  pub fn into_result(self) -> Result<Context, (StepError, ErrorContext)> {
    match self {
      Outcome::Success { ctx } => Ok(ctx),
      Outcome::Failure { error, error_ctx } => Err((error, error_ctx)),
    }
  }
}

/// Wire shape:
/// `{"ok":true,"value":{"ctx":{..}}}` or `{"ok":false,"error":{"error":"<message>","errorCtx":{..}}}`.
impl Serialize for Outcome {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    struct SuccessValue<'a> {
      ctx: &'a Context,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct FailureValue<'a> {
      error: String,
      error_ctx: &'a ErrorContext,
    }

    let mut state = serializer.serialize_struct("Outcome", 2)?;
    match self {
      Outcome::Success { ctx } => {
        state.serialize_field("ok", &true)?;
        state.serialize_field("value", &SuccessValue { ctx })?;
      }
      Outcome::Failure { error, error_ctx } => {
        state.serialize_field("ok", &false)?;
        state.serialize_field(
          "error",
          &FailureValue {
            error: error.message(),
            error_ctx,
          },
        )?;
      }
    }
    state.end()
  }
}

/// An `Outcome` returned from a step, tagging it as the result of a nested
/// pipeline rather than a plain context update.
///
/// Intentionally not `Serialize`: the marker never leaves the engine.
#[derive(Debug, Clone)]
pub struct NestedOutcome(Outcome);

impl NestedOutcome {
  pub fn new(outcome: Outcome) -> Self {
    NestedOutcome(outcome)
  }

  pub fn outcome(&self) -> &Outcome {
    &self.0
  }

  /// Strips the marker.
  pub fn into_outcome(self) -> Outcome {
    self.0
  }
}

impl From<Outcome> for NestedOutcome {
  fn from(outcome: Outcome) -> Self {
    NestedOutcome(outcome)
  }
}
