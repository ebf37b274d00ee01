// switchyard/src/core/pipeline_trait.rs

//! Defines the `AnyPipeline` trait for type-erased pipeline execution, used when
//! a pipeline is composed into another one as a single step.

use crate::core::context::Context;
use crate::core::outcome::Outcome;
use crate::error::SwitchyardError;
use async_trait::async_trait;

/// Anything that can be run to a single `Outcome` from an initial context.
///
/// `Pipeline` implements this; `nested_step` accepts any implementation, so a
/// hand-written runner can be mounted as a step exactly like a pipeline.
#[async_trait]
pub trait AnyPipeline: Send + Sync {
  /// Runs to completion. `Err` means the run aborted without an outcome
  /// (a recovery handler failed).
  async fn run_any(&self, ctx: Context) -> Result<Outcome, SwitchyardError>;

  fn name(&self) -> Option<&str> {
    None
  }
}
