pub mod context;
pub mod outcome;
pub mod pipeline_trait;
pub mod step;

// Re-export key types for easier access from other switchyard modules (and lib.rs)
pub use context::{merge, merge_opt, Context, ErrorContext};
pub use outcome::{NestedOutcome, Outcome};
pub use pipeline_trait::AnyPipeline;
pub use step::{BoxFuture, FailFn, IntoStepOutput, IntoUpdate, StepEntry, StepFn, StepKind, StepOutput};
