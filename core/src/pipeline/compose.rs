// switchyard/src/pipeline/compose.rs

//! Turns a whole pipeline into a single step of another pipeline.

use crate::core::context::Context;
use crate::core::outcome::{NestedOutcome, Outcome};
use crate::core::pipeline_trait::AnyPipeline;
use crate::core::step::BoxFuture;
use crate::error::SwitchyardError;
use crate::pipeline::definition::Pipeline;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{event, Level};

#[async_trait]
impl AnyPipeline for Pipeline {
  async fn run_any(&self, ctx: Context) -> Result<Outcome, SwitchyardError> {
    self.run(ctx).await
  }

  fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
}

impl Pipeline {
  /// Produces a callback that can be registered with [`Pipeline::step`] on another
  /// pipeline.
  ///
  /// Each call runs this pipeline to completion, starting from the context passed
  /// in, and returns its outcome as a `NestedOutcome`. The outer run then merges a
  /// successful nested context. A failed nested run puts the outer run into
  /// recovery, and the nested error context becomes the starting outer one.
  ///
  /// The registry is snapshotted here. Entries added to `self` afterwards are not
  /// part of the returned step, so mounting a pipeline that is still being built
  /// is not the same as mounting the finished one. Call `to_step` last.
  pub fn to_step(&self) -> impl Fn(Context) -> BoxFuture<anyhow::Result<NestedOutcome>> + Clone + Send + Sync + 'static {
    nested_step(Arc::new(self.clone()))
  }
}

/// Like [`Pipeline::to_step`], for any type-erased runner.
///
/// If the nested run aborts (`Err` from `run_any`, e.g. a failing recovery handler
/// inside it), the error is returned from the step. The outer pipeline then
/// treats it as an ordinary step failure.
pub fn nested_step(
  runner: Arc<dyn AnyPipeline>,
) -> impl Fn(Context) -> BoxFuture<anyhow::Result<NestedOutcome>> + Clone + Send + Sync + 'static {
  move |ctx: Context| -> BoxFuture<anyhow::Result<NestedOutcome>> {
    let runner = Arc::clone(&runner);
    Box::pin(async move {
      event!(
        Level::DEBUG,
        nested_pipeline = runner.name().unwrap_or("<unnamed>"),
        "Running nested pipeline as a step."
      );
      let outcome = runner.run_any(ctx).await?;
      Ok::<_, anyhow::Error>(NestedOutcome::new(outcome))
    })
  }
}
