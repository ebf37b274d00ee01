// switchyard/examples/error_handling.rs

use serde_json::json;
use switchyard::{pipeline, Context, Outcome};
use tracing::{error, info, warn};

// A custom application error; any std error converts into anyhow with `?`.
#[derive(Debug, thiserror::Error)]
enum PaymentError {
  #[error("Card declined: {0}")]
  Declined(String),
}

fn order() -> Context {
  json!({ "order_id": 42, "amount": 1999 }).as_object().cloned().unwrap_or_default()
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Error Handling Example ---");

  info!("\nScenario 1: a step fails and the recovery handlers run");
  recover_from_step_failure().await;

  info!("\nScenario 2: a recovery handler fails and the run aborts");
  handler_failure_aborts().await;
}

async fn recover_from_step_failure() {
  let outcome = pipeline()
    .step_sync(|_| Ok(json!({ "reserved": true })))
    .step_sync(|ctx: Context| -> anyhow::Result<()> {
      Err(PaymentError::Declined(format!("order {}", ctx["order_id"])).into())
    })
    .step_sync(|_| {
      // Never runs: the run is on the recovery track now.
      Ok(json!({ "shipped": true }))
    })
    .fail_sync(|error, _, ctx| {
      warn!("Releasing reservation after: {}", error);
      Ok(json!({ "released": ctx["reserved"].clone() }))
    })
    .fail_fast_sync(|error, error_ctx, _| {
      let declined = error.downcast_ref::<PaymentError>().is_some();
      info!("Notifying customer (declined = {}), so far: {:?}", declined, error_ctx);
      Ok(json!({ "notified": true }))
    })
    .fail_sync(|_, _, _| {
      // Never runs: fail_fast ended the recovery chain.
      Ok(json!({ "unreachable": true }))
    })
    .run(order())
    .await;

  match outcome {
    Ok(Outcome::Failure { error, error_ctx }) => {
      info!("Pipeline failed as expected: {}", error);
      info!("Recovery recorded: {}", serde_json::Value::Object(error_ctx));
    }
    Ok(Outcome::Success { .. }) => error!("Pipeline unexpectedly succeeded"),
    Err(e) => error!("Run aborted: {}", e),
  }
}

async fn handler_failure_aborts() {
  let result = pipeline()
    .step_sync(|_| Err::<(), _>(anyhow::anyhow!("inventory service unavailable")))
    .fail_sync(|_, _, _| Err::<(), _>(anyhow::anyhow!("audit log is read-only")))
    .run(order())
    .await;

  match result {
    Err(e) => info!("Run aborted without an outcome, as expected: {}", e),
    Ok(outcome) => error!("Expected an aborted run, got {:?}", outcome),
  }
}
