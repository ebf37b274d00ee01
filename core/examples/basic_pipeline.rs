// switchyard/examples/basic_pipeline.rs

use serde_json::json;
use switchyard::{Context, Outcome, Pipeline, SwitchyardError};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), SwitchyardError> {
  // Initialize tracing (RUST_LOG=switchyard=trace shows every merge)
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  info!("--- Basic Pipeline Example ---");

  // 1. Build the pipeline. Each call appends one entry and returns the same pipeline.
  let mut pipeline = Pipeline::named("basic");
  pipeline
    .step_sync(|ctx: Context| {
      let counter = ctx["counter"].as_i64().unwrap_or(0) + 1;
      info!("Alpha executed: counter = {}", counter);
      Ok(json!({ "counter": counter, "log": ["alpha"] }))
    })
    .step(|ctx: Context| async move {
      // Async steps are awaited before the next one starts.
      tokio::time::sleep(std::time::Duration::from_millis(10)).await;
      let counter = ctx["counter"].as_i64().unwrap_or(0) * 2;
      info!("Beta executed: counter = {}", counter);
      Ok(json!({ "counter": counter, "log": ["alpha", "beta"] }))
    })
    .step_sync(|ctx: Context| {
      // Returning nothing leaves the context as it is.
      info!("Gamma only reads: counter = {}", ctx["counter"]);
      Ok(())
    });

  // 2. Run it against an initial context
  let initial = json!({ "counter": 5 }).as_object().cloned().unwrap_or_default();
  let outcome = pipeline.run(initial).await?;

  // 3. Inspect the outcome
  match &outcome {
    Outcome::Success { ctx } => {
      info!("Pipeline completed successfully! Final context: {}", serde_json::Value::Object(ctx.clone()));
      // Expected: (5 + 1) * 2 = 12
      assert_eq!(ctx["counter"], json!(12));
    }
    Outcome::Failure { error, .. } => info!("Pipeline failed: {}", error),
  }

  info!("Wire shape: {}", serde_json::to_string(&outcome).unwrap_or_default());
  Ok(())
}
