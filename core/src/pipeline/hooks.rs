// switchyard/src/pipeline/hooks.rs

//! Contains the builder methods that register `step`, `fail` and `fail_fast`
//! entries. Each one appends exactly one entry and returns the same pipeline so
//! calls can be chained. Nothing is validated here; a misbehaving callback only
//! shows up when `run()` executes it.

use crate::core::context::{Context, ErrorContext};
use crate::core::step::{BoxFuture, FailFn, IntoStepOutput, IntoUpdate, StepEntry, StepFn, StepOutput};
use crate::error::StepError;
use crate::pipeline::definition::Pipeline;
use std::future::{ready, Future};
use std::sync::Arc;

impl Pipeline {
  /// Registers an asynchronous step.
  ///
  /// `step_fn` receives a snapshot of the current context and resolves to
  /// `anyhow::Result<R>`. `R` may be `()`, a `Context`, an `Option<Context>`, a JSON
  /// object `Value`, or a `NestedOutcome` produced by [`Pipeline::to_step`].
  /// An `Err` sends the run onto the recovery track.
  pub fn step<F, Fut, R>(&mut self, step_fn: F) -> &mut Self
  where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
    R: IntoStepOutput + Send + 'static,
  {
    let callback: StepFn = Arc::new(move |ctx: Context| -> BoxFuture<anyhow::Result<StepOutput>> {
      let user_fut = step_fn(ctx);
      Box::pin(async move { user_fut.await?.into_step_output() })
    });
    self.push(StepEntry::Step(callback))
  }

  /// Registers a synchronous step. Same contract as [`Pipeline::step`].
  pub fn step_sync<F, R>(&mut self, step_fn: F) -> &mut Self
  where
    F: Fn(Context) -> anyhow::Result<R> + Send + Sync + 'static,
    R: IntoStepOutput + Send + 'static,
  {
    self.step(move |ctx| ready(step_fn(ctx)))
  }

  /// Registers a recovery handler.
  ///
  /// Once a step has failed, `fail` handlers run in registration order with
  /// `(error, error_ctx, ctx)` and their returned update is merged into the error
  /// context seen by later handlers. An `Err` from a handler is not caught: `run()`
  /// returns `SwitchyardError::HandlerFailure`.
  pub fn fail<F, Fut, U>(&mut self, fail_fn: F) -> &mut Self
  where
    F: Fn(StepError, ErrorContext, Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<U>> + Send + 'static,
    U: IntoUpdate + Send + 'static,
  {
    self.push(StepEntry::Fail(wrap_fail_fn(fail_fn)))
  }

  pub fn fail_sync<F, U>(&mut self, fail_fn: F) -> &mut Self
  where
    F: Fn(StepError, ErrorContext, Context) -> anyhow::Result<U> + Send + Sync + 'static,
    U: IntoUpdate + Send + 'static,
  {
    self.fail(move |error, error_ctx, ctx| ready(fail_fn(error, error_ctx, ctx)))
  }

  /// Registers a recovery handler that ends the recovery chain.
  ///
  /// Same signature as [`Pipeline::fail`]. After it runs, no further `fail` or
  /// `fail_fast` entries execute and the run resolves to `Outcome::Failure`.
  pub fn fail_fast<F, Fut, U>(&mut self, fail_fn: F) -> &mut Self
  where
    F: Fn(StepError, ErrorContext, Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<U>> + Send + 'static,
    U: IntoUpdate + Send + 'static,
  {
    self.push(StepEntry::FailFast(wrap_fail_fn(fail_fn)))
  }

  pub fn fail_fast_sync<F, U>(&mut self, fail_fn: F) -> &mut Self
  where
    F: Fn(StepError, ErrorContext, Context) -> anyhow::Result<U> + Send + Sync + 'static,
    U: IntoUpdate + Send + 'static,
  {
    self.fail_fast(move |error, error_ctx, ctx| ready(fail_fn(error, error_ctx, ctx)))
  }
}

fn wrap_fail_fn<F, Fut, U>(fail_fn: F) -> FailFn
where
  F: Fn(StepError, ErrorContext, Context) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = anyhow::Result<U>> + Send + 'static,
  U: IntoUpdate + Send + 'static,
{
  Arc::new(
    move |error: StepError, error_ctx: ErrorContext, ctx: Context| -> BoxFuture<anyhow::Result<Option<ErrorContext>>> {
      let user_fut = fail_fn(error, error_ctx, ctx);
      Box::pin(async move { user_fut.await?.into_update() })
    },
  )
}
