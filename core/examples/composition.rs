// switchyard/examples/composition.rs

use serde_json::json;
use switchyard::{Context, Outcome, Pipeline};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();
  info!("--- Composition Example ---");

  // A reusable sub-pipeline: validates an address and records why it failed.
  let mut validate_address = Pipeline::named("validate_address");
  validate_address
    .step_sync(|ctx: Context| {
      let zip = ctx["zip"].as_str().unwrap_or_default().to_string();
      if zip.len() != 5 {
        anyhow::bail!("invalid zip code '{}'", zip);
      }
      Ok(json!({ "address_valid": true }))
    })
    .fail_sync(|_, _, ctx| Ok(json!({ "bad_zip": ctx["zip"].clone() })));

  // The outer pipeline mounts it as one step.
  let mut signup = Pipeline::named("signup");
  signup
    .step_sync(|_| Ok(json!({ "user_id": 7 })))
    .step(validate_address.to_step())
    .step_sync(|_| Ok(json!({ "welcome_sent": true })))
    .fail_sync(|error, error_ctx, _| {
      // error_ctx starts as whatever the nested recovery recorded.
      info!("Signup failed: {} (nested error context: {:?})", error, error_ctx);
      Ok(json!({ "signup_rolled_back": true }))
    });

  for zip in ["12345", "12"] {
    let initial = json!({ "zip": zip }).as_object().cloned().unwrap_or_default();
    match signup.run(initial).await? {
      Outcome::Success { ctx } => info!("zip {}: success {}", zip, serde_json::Value::Object(ctx)),
      Outcome::Failure { error, error_ctx } => {
        info!("zip {}: failure '{}' {}", zip, error, serde_json::Value::Object(error_ctx))
      }
    }
  }

  Ok(())
}
