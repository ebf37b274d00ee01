// switchyard/src/pipeline/execution.rs

//! Contains the `Pipeline::run()` method: the two-track scheduler that walks the
//! registry once, running steps until the first failure and recovery handlers
//! from that point on.

use crate::core::context::{merge, merge_opt, Context, ErrorContext};
use crate::core::outcome::Outcome;
use crate::core::step::{StepEntry, StepKind, StepOutput};
use crate::error::{StepError, SwitchyardError};
use crate::pipeline::definition::Pipeline;
use tracing::{event, instrument, span, Instrument, Level};

impl Pipeline {
  /// Executes the pipeline against `initial`.
  ///
  /// Resolves to `Ok(Outcome::Success)` when every step ran, or to
  /// `Ok(Outcome::Failure)` when a step failed. That holds whether or not
  /// recovery handlers ran. A step error never escapes as `Err`.
  ///
  /// `Err` is reserved for failures the engine does not absorb: a `fail` /
  /// `fail_fast` handler returning an error (`HandlerFailure`), or an internal
  /// scheduling defect (`Unreachable`).
  ///
  /// There is no timeout. A callback that never resolves suspends the run for good.
  #[instrument(
        name = "Pipeline::run",
        skip_all,
        fields(
            pipeline = %self.display_name(),
            num_entries = self.entries.len(),
        ),
        err(Display)
    )]
  pub async fn run(&self, initial: Context) -> Result<Outcome, SwitchyardError> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    let mut cursor = 0usize;
    let mut ctx = initial;
    let mut error_ctx = ErrorContext::new();
    // `None` while on the success track. Set once, by the first failing step.
    let mut failure: Option<StepError> = None;

    loop {
      match failure.clone() {
        None => {
          let Some(index) = self.next_index(cursor, |kind| kind == StepKind::Step) else {
            event!(Level::DEBUG, "Pipeline execution completed successfully.");
            return Ok(Outcome::success(ctx));
          };
          cursor = index;

          let StepEntry::Step(step_fn) = &self.entries[index] else {
            event!(Level::ERROR, entry_index = index, "Step scan landed on a recovery handler.");
            return Err(SwitchyardError::Unreachable);
          };

          let step_span = span!(Level::DEBUG, "pipeline_step", entry_index = index, kind = %StepKind::Step);
          match step_fn(ctx.clone()).instrument(step_span).await {
            Ok(StepOutput::Update(update)) => {
              event!(Level::TRACE, entry_index = index, keys = update.len(), "Merging step update into context.");
              ctx = merge(ctx, update);
            }
            Ok(StepOutput::NoUpdate) => {
              event!(Level::TRACE, entry_index = index, "Step returned no update.");
            }
            Ok(StepOutput::Nested(Outcome::Success { ctx: nested_ctx })) => {
              event!(Level::TRACE, entry_index = index, "Merging nested pipeline context.");
              ctx = merge(ctx, nested_ctx);
            }
            Ok(StepOutput::Nested(Outcome::Failure {
              error,
              error_ctx: nested_error_ctx,
            })) => {
              event!(Level::WARN, entry_index = index, error = %error, "Nested pipeline failed, switching to recovery.");
              // The nested error context becomes the starting one, it is not merged.
              error_ctx = nested_error_ctx;
              failure = Some(error);
            }
            Err(e) => {
              event!(Level::WARN, entry_index = index, error = %e, "Step failed, switching to recovery.");
              failure = Some(StepError::new(e));
            }
          }
        }
        Some(error) => {
          let Some(index) = self.next_index(cursor, StepKind::is_recovery) else {
            event!(Level::DEBUG, "Recovery chain exhausted, pipeline failed.");
            return Ok(Outcome::failure(error, error_ctx));
          };

          let skipped = self.entries[cursor..index]
            .iter()
            .filter(|entry| entry.kind() == StepKind::Step)
            .count();
          if skipped > 0 {
            event!(Level::INFO, skipped, "Skipping steps on the recovery track.");
          }
          cursor = index;

          let (kind, fail_fn) = match &self.entries[index] {
            StepEntry::Fail(fail_fn) => (StepKind::Fail, fail_fn),
            StepEntry::FailFast(fail_fn) => (StepKind::FailFast, fail_fn),
            StepEntry::Step(_) => {
              event!(Level::ERROR, entry_index = index, "Recovery scan landed on a step.");
              return Err(SwitchyardError::Unreachable);
            }
          };

          let handler_span = span!(Level::DEBUG, "pipeline_recovery_handler", entry_index = index, kind = %kind);
          let update = fail_fn(error.clone(), error_ctx.clone(), ctx.clone())
            .instrument(handler_span)
            .await
            .map_err(|source| {
              event!(Level::ERROR, entry_index = index, kind = %kind, error = %source, "Recovery handler failed, aborting run.");
              SwitchyardError::HandlerFailure { index, kind, source }
            })?;
          error_ctx = merge_opt(error_ctx, update);

          if kind == StepKind::FailFast {
            event!(Level::INFO, entry_index = index, "Recovery chain stopped by fail_fast handler.");
            return Ok(Outcome::failure(error, error_ctx));
          }
        }
      }
      cursor += 1;
    }
  }
}
