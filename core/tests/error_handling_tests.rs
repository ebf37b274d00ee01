// tests/error_handling_tests.rs
mod common;

use anyhow::anyhow;
use common::*;
use serde_json::json;
use switchyard::{pipeline, Context, StepKind, SwitchyardError};

#[tokio::test]
async fn test_step_error_keeps_its_concrete_type() {
  setup_tracing();
  let outcome = pipeline()
    .step_sync(|_| Err::<(), _>(anyhow::Error::new(TestError::Step("boom".to_string()))))
    .run(Context::new())
    .await
    .unwrap();

  let error = outcome.error().expect("run should have failed");
  assert_eq!(error.downcast_ref::<TestError>(), Some(&TestError::Step("boom".to_string())));
  assert_eq!(error.to_string(), "Test step failed: boom");
}

#[tokio::test]
async fn test_every_handler_sees_the_first_error() {
  setup_tracing();
  let outcome = pipeline()
    .step_sync(|_| Err::<(), _>(anyhow!("first")))
    .fail_sync(|error, _, _| Ok(json!({"seen_by_fail": error.message()})))
    .fail_fast_sync(|error, _, _| Ok(json!({"seen_by_fail_fast": error.message()})))
    .run(Context::new())
    .await
    .unwrap();

  assert_eq!(outcome.error().unwrap().message(), "first");
  assert_eq!(
    as_value(outcome.error_ctx().unwrap()),
    json!({"seen_by_fail": "first", "seen_by_fail_fast": "first"})
  );
}

#[tokio::test]
async fn test_fail_handler_error_aborts_the_run() {
  setup_tracing();
  let spy = Spy::new();
  let s = spy.clone();

  let result = pipeline()
    .step_sync(|_| Err::<(), _>(anyhow!("step boom")))
    .fail_sync(|_, _, _| Err::<(), _>(anyhow::Error::new(TestError::Handler("oops".to_string()))))
    .fail_sync(move |_, _, _| {
      s.hit();
      Ok(())
    })
    .run(Context::new())
    .await;

  assert_eq!(spy.calls(), 0);
  match result {
    Err(SwitchyardError::HandlerFailure { index, kind, source }) => {
      assert_eq!(index, 1);
      assert_eq!(kind, StepKind::Fail);
      assert_eq!(source.downcast_ref::<TestError>(), Some(&TestError::Handler("oops".to_string())));
    }
    other => panic!("Expected SwitchyardError::HandlerFailure, got {:?}", other),
  }
}

#[tokio::test]
async fn test_fail_fast_handler_error_aborts_the_run() {
  setup_tracing();
  let result = pipeline()
    .step(|_| async { Err::<(), _>(anyhow!("step boom")) })
    .fail_sync(|_, _, _| Ok(json!({"a": 1})))
    .step_sync(|_| Ok(()))
    .fail_fast(|_, _, _| async { Err::<(), _>(anyhow!("fast boom")) })
    .run(Context::new())
    .await;

  let err = result.expect_err("handler failure must not produce an outcome");
  assert_eq!(err.to_string(), "fail_fast handler at index 3 failed. Source: fast boom");
  assert!(matches!(
    err,
    SwitchyardError::HandlerFailure {
      index: 3,
      kind: StepKind::FailFast,
      ..
    }
  ));
}

#[tokio::test]
async fn test_invalid_step_update_is_a_step_failure() {
  setup_tracing();
  let log = CallLog::new();
  let l = log.clone();

  let outcome = pipeline()
    .step_sync(|_| Ok(json!(["not", "an", "object"])))
    .fail_sync(move |error, _, _| {
      l.push(&error.message());
      Ok(())
    })
    .run(Context::new())
    .await
    .unwrap();

  assert!(outcome.is_err());
  assert_eq!(
    log.entries(),
    vec!["Context update must be a JSON object or null, found an array"]
  );
  assert!(matches!(
    outcome.error().unwrap().downcast_ref::<SwitchyardError>(),
    Some(SwitchyardError::InvalidUpdate { found: "an array" })
  ));
}

#[tokio::test]
async fn test_invalid_handler_update_is_a_handler_failure() {
  setup_tracing();
  let result = pipeline()
    .step_sync(|_| Err::<(), _>(anyhow!("boom")))
    .fail_sync(|_, _, _| Ok(json!(42)))
    .run(Context::new())
    .await;

  match result {
    Err(SwitchyardError::HandlerFailure { index, kind, source }) => {
      assert_eq!(index, 1);
      assert_eq!(kind, StepKind::Fail);
      assert!(matches!(
        source.downcast_ref::<SwitchyardError>(),
        Some(SwitchyardError::InvalidUpdate { found: "a number" })
      ));
    }
    other => panic!("Expected SwitchyardError::HandlerFailure, got {:?}", other),
  }
}

#[test]
fn test_unreachable_error_message() {
  assert_eq!(
    SwitchyardError::Unreachable.to_string(),
    "Internal switchyard error: pipeline run ended without reaching a terminal state"
  );
}

#[tokio::test]
async fn test_step_error_keeps_its_context_chain() {
  setup_tracing();
  let outcome = pipeline()
    .step_sync(|_| Err::<(), _>(anyhow!("connection refused").context("loading user")))
    .run(Context::new())
    .await
    .unwrap();

  let error = outcome.error().unwrap();
  assert_eq!(error.message(), "loading user");
  assert_eq!(error.inner().chain().count(), 2);
  assert_eq!(error.inner().root_cause().to_string(), "connection refused");
}
