//! Notebook Execution Orchestrator.

use std::sync::Arc;
use std::time::Duration;

use nbops_core::RunIdGenerator;
use nbops_engine::notebook::{NotebookEngine, NotebookExecutor, Parameters};
use serde_json::json;
use test_fixtures::{FakeNotebookEngine, TestWorkspace};

fn executor(ws: &TestWorkspace, engine: Arc<FakeNotebookEngine>) -> NotebookExecutor {
    let engine: Arc<dyn NotebookEngine> = engine;
    NotebookExecutor::new(Arc::clone(&ws.config), engine, Arc::new(RunIdGenerator::new()))
}

fn params() -> Parameters {
    json!({"mode": "scoring"}).as_object().cloned().unwrap()
}

#[tokio::test]
async fn test_named_output_lands_in_executed_dir() {
    let ws = TestWorkspace::new();
    let engine = Arc::new(FakeNotebookEngine::returning(vec![]));
    let exec = executor(&ws, Arc::clone(&engine));

    let path = exec.execute(params(), Some("custom.ipynb")).await.unwrap();
    assert_eq!(path, ws.config.paths.executed_notebooks_dir().join("custom.ipynb"));
    assert!(path.is_file());
    assert_eq!(engine.calls()[0].parameters, params());
}

#[tokio::test]
async fn test_unnamed_output_gets_a_run_id() {
    let ws = TestWorkspace::new();
    let exec = executor(&ws, Arc::new(FakeNotebookEngine::returning(vec![])));

    let first = exec.execute(params(), None).await.unwrap();
    let second = exec.execute(params(), None).await.unwrap();
    let name = first.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("executed_"));
    assert!(name.ends_with(".ipynb"));
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_configured_kernel_and_timeout_are_passed() {
    let ws = TestWorkspace::with_config(|c| {
        c.execution.kernel_name = "churn-env".into();
        c.execution.timeout_secs = 42;
    });
    let engine = Arc::new(FakeNotebookEngine::returning(vec![]));
    let exec = executor(&ws, Arc::clone(&engine));

    exec.execute(params(), None).await.unwrap();
    let call = &engine.calls()[0];
    assert_eq!(call.kernel_name, "churn-env");
    assert_eq!(call.timeout, Duration::from_secs(42));
}

#[tokio::test]
async fn test_failure_is_returned_not_swallowed() {
    let ws = TestWorkspace::new();
    let exec = executor(&ws, Arc::new(FakeNotebookEngine::failing("boom")));

    let err = exec.execute(params(), None).await.unwrap_err();
    assert!(err.to_string().starts_with("Failed to execute notebook"));
}
