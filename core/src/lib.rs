// src/lib.rs

//! Switchyard: a small async pipeline executor with a success track and a
//! recovery track.
//!
//! A pipeline is an ordered registry of entries:
//!  - `step`s run in order, each seeing the latest context and returning a partial
//!    update that is shallow-merged on top.
//!  - `fail` handlers run in order once a step has failed, accumulating an error
//!    context of their own.
//!  - `fail_fast` handlers run like `fail` handlers but end the recovery chain.
//!
//! The first step error switches the run onto the recovery track for good. Every
//! run resolves to a single `Outcome`. A whole pipeline can also be mounted as one
//! step of another through `to_step`.

pub mod core;
pub mod error;
pub mod pipeline;

// --- Re-exports for the Public API ---

pub use crate::core::context::{merge, merge_opt, Context, ErrorContext};
pub use crate::core::outcome::{NestedOutcome, Outcome};
pub use crate::core::pipeline_trait::AnyPipeline;
pub use crate::core::step::{
  BoxFuture, FailFn, IntoStepOutput, IntoUpdate, StepEntry, StepFn, StepKind, StepOutput,
};

pub use crate::pipeline::{nested_step, pipeline, Pipeline};

pub use crate::error::{StepError, SwitchyardError, SwitchyardResult};

/*
    Core workflow:
    1. Build a `Pipeline` with `.step(..)`, `.fail(..)` and `.fail_fast(..)` (or their
       `_sync` forms). Each call appends one entry and returns the same pipeline.
    2. Call `pipeline.run(initial_ctx).await`.
    3. Match on the `Outcome`:
       - `Outcome::Success { ctx }`: every step ran, `ctx` is the merged context.
       - `Outcome::Failure { error, error_ctx }`: the first step error plus whatever
         the recovery handlers recorded.
    4. An `Err(SwitchyardError)` from `run` means a recovery handler itself failed.
    5. To nest, register `inner.to_step()` as a step of the outer pipeline.
*/
