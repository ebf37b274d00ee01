// switchyard/src/core/step.rs

//! Registry entries: the kind tag, the type-erased callbacks stored for each
//! kind, and the conversions from user return values into engine-level updates.

use crate::core::context::{Context, ErrorContext};
use crate::core::outcome::{NestedOutcome, Outcome};
use crate::error::{StepError, SwitchyardError};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Stored form of a `step` callback.
///
/// Receives an owned snapshot of the current context. An `Err` is a step failure
/// and moves the run onto the recovery track.
pub type StepFn = Arc<dyn Fn(Context) -> BoxFuture<anyhow::Result<StepOutput>> + Send + Sync>;

/// Stored form of a `fail` / `fail_fast` callback.
///
/// Receives `(error, error_ctx, ctx)` and returns an optional error-context update.
/// An `Err` here is NOT routed anywhere: it aborts the run.
pub type FailFn =
  Arc<dyn Fn(StepError, ErrorContext, Context) -> BoxFuture<anyhow::Result<Option<ErrorContext>>> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
  Step,
  Fail,
  FailFast,
}

impl StepKind {
  /// `Fail` and `FailFast` are scanned together once a run has failed.
  pub fn is_recovery(self) -> bool {
    matches!(self, StepKind::Fail | StepKind::FailFast)
  }
}

impl fmt::Display for StepKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      StepKind::Step => "step",
      StepKind::Fail => "fail",
      StepKind::FailFast => "fail_fast",
    };
    f.write_str(label)
  }
}

/// One registered operation. Immutable once appended to a pipeline.
#[derive(Clone)]
pub enum StepEntry {
  Step(StepFn),
  Fail(FailFn),
  FailFast(FailFn),
}

impl StepEntry {
  pub fn kind(&self) -> StepKind {
    match self {
      StepEntry::Step(_) => StepKind::Step,
      StepEntry::Fail(_) => StepKind::Fail,
      StepEntry::FailFast(_) => StepKind::FailFast,
    }
  }
}

// Callbacks are not Debug.
impl fmt::Debug for StepEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("StepEntry").field(&self.kind()).finish()
  }
}

/// What a step handed back to the engine.
#[derive(Debug)]
pub enum StepOutput {
  /// Partial context, shallow-merged on top of the current one.
  Update(Context),
  NoUpdate,
  /// Outcome of a composed sub-pipeline, unwrapped by the outer run.
  Nested(Outcome),
}

/// Conversion for values returned from `fail` / `fail_fast` handlers (and, via
/// [`IntoStepOutput`], from steps).
pub trait IntoUpdate {
  fn into_update(self) -> anyhow::Result<Option<Context>>;
}

impl IntoUpdate for () {
  fn into_update(self) -> anyhow::Result<Option<Context>> {
    Ok(None)
  }
}

impl IntoUpdate for Context {
  fn into_update(self) -> anyhow::Result<Option<Context>> {
    Ok(Some(self))
  }
}

impl IntoUpdate for Option<Context> {
  fn into_update(self) -> anyhow::Result<Option<Context>> {
    Ok(self)
  }
}

/// `Object` is an update and `Null` is no update. Anything else is rejected when the
/// callback runs.
impl IntoUpdate for Value {
  fn into_update(self) -> anyhow::Result<Option<Context>> {
    match self {
      Value::Object(map) => Ok(Some(map)),
      Value::Null => Ok(None),
      other => Err(
        SwitchyardError::InvalidUpdate {
          found: json_type_name(&other),
        }
        .into(),
      ),
    }
  }
}

fn json_type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

/// Conversion for values returned from `step` callbacks.
pub trait IntoStepOutput {
  fn into_step_output(self) -> anyhow::Result<StepOutput>;
}

impl<T: IntoUpdate> IntoStepOutput for T {
  fn into_step_output(self) -> anyhow::Result<StepOutput> {
    Ok(match self.into_update()? {
      Some(update) => StepOutput::Update(update),
      None => StepOutput::NoUpdate,
    })
  }
}

impl IntoStepOutput for NestedOutcome {
  fn into_step_output(self) -> anyhow::Result<StepOutput> {
    Ok(StepOutput::Nested(self.into_outcome()))
  }
}

impl IntoStepOutput for StepOutput {
  fn into_step_output(self) -> anyhow::Result<StepOutput> {
    Ok(self)
  }
}
