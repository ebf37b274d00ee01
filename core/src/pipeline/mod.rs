// switchyard/src/pipeline/mod.rs

//! Defines the `Pipeline` struct, its construction, registration, execution and
//! composition logic.

pub mod compose;
pub mod definition;
pub mod execution;
pub mod hooks;

// Re-export the main Pipeline struct
pub use compose::nested_step;
pub use definition::{pipeline, Pipeline};
