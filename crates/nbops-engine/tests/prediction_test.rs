//! Prediction Orchestrator against a fake notebook engine.

use std::sync::Arc;

use nbops_core::errors::{NotebookExecutionError, PredictionError};
use nbops_core::models::PredictionRequest;
use nbops_core::RunIdGenerator;
use nbops_engine::notebook::{NotebookEngine, NotebookExecutor};
use nbops_engine::PredictionService;
use serde_json::json;
use test_fixtures::{load_fixture, record, FakeNotebookEngine, TestWorkspace};

fn service(ws: &TestWorkspace, engine: Arc<FakeNotebookEngine>) -> PredictionService {
    let ids = Arc::new(RunIdGenerator::new());
    let engine: Arc<dyn NotebookEngine> = engine;
    let executor = Arc::new(NotebookExecutor::new(
        Arc::clone(&ws.config),
        engine,
        Arc::clone(&ids),
    ));
    PredictionService::new(Arc::clone(&ws.config), executor, ids)
}

#[tokio::test]
async fn test_single_record_end_to_end() {
    let ws = TestWorkspace::new();
    let engine = Arc::new(FakeNotebookEngine::returning(vec![0.73]));
    let svc = service(&ws, Arc::clone(&engine));

    let request: PredictionRequest = load_fixture("predict_request.json");
    let response = svc.predict(&request.data).await.unwrap();

    assert_eq!(response.predictions, vec![0.73]);
    assert_eq!(response.model_version, "v1.0");
    assert!(response.execution_time >= 0.0);

    // One persisted batch holding exactly the submitted row.
    let inputs = TestWorkspace::file_names(&ws.input_dir());
    assert_eq!(inputs.len(), 1);
    assert!(inputs[0].starts_with("input_") && inputs[0].ends_with(".csv"));
    let csv = std::fs::read_to_string(ws.input_dir().join(&inputs[0])).unwrap();
    assert_eq!(csv, "age,tenure\n30,5\n");

    // The engine saw paths derived from the same run id.
    let calls = engine.calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    let token = inputs[0]
        .trim_start_matches("input_")
        .trim_end_matches(".csv")
        .to_string();
    assert_eq!(
        call.parameters["input_file"],
        json!(ws.input_dir().join(&inputs[0]).display().to_string())
    );
    assert_eq!(
        call.parameters["output_file"],
        json!(ws
            .config
            .paths
            .output_dir()
            .join(format!("predictions_{token}.json"))
            .display()
            .to_string())
    );
    assert_eq!(call.parameters["model_version"], json!("v1.0"));
    assert_eq!(call.notebook, ws.config.paths.notebook_path());
    assert_eq!(call.kernel_name, "python3");
    assert_eq!(call.timeout.as_secs(), 300);

    let expected_notebook = ws
        .config
        .paths
        .executed_notebooks_dir()
        .join(format!("prediction_{token}.ipynb"));
    assert_eq!(call.output, expected_notebook);
    assert_eq!(response.notebook_path, expected_notebook.display().to_string());
    assert!(expected_notebook.is_file());
}

#[tokio::test]
async fn test_configured_model_version_wins_over_request() {
    let ws = TestWorkspace::with_config(|c| c.prediction.model_version = "v2.3".into());
    let engine = Arc::new(FakeNotebookEngine::per_row(0.5));
    let svc = service(&ws, Arc::clone(&engine));

    let request: PredictionRequest = load_fixture("predict_request_pair.json");
    assert_eq!(request.model_version.as_deref(), Some("v9.9"));

    let response = svc.predict(&request.data).await.unwrap();
    assert_eq!(response.model_version, "v2.3");
    assert_eq!(response.predictions, vec![0.5, 0.5]);
    assert_eq!(engine.calls()[0].parameters["model_version"], json!("v2.3"));
}

#[tokio::test]
async fn test_prediction_count_matches_input_count() {
    let ws = TestWorkspace::new();
    let svc = service(&ws, Arc::new(FakeNotebookEngine::per_row(0.1)));

    let records: Vec<_> = (0..25)
        .map(|i| record(json!({"age": 20 + i, "tenure": i})))
        .collect();
    let response = svc.predict(&records).await.unwrap();
    assert_eq!(response.predictions.len(), records.len());
}

#[tokio::test]
async fn test_length_mismatch_passes_through_by_default() {
    let ws = TestWorkspace::new();
    let mismatched: Vec<f64> = load_fixture("mismatched_predictions.json");
    let svc = service(&ws, Arc::new(FakeNotebookEngine::returning(mismatched)));

    let request: PredictionRequest = load_fixture("predict_request_pair.json");
    let response = svc.predict(&request.data).await.unwrap();
    assert_eq!(request.data.len(), 2);
    assert_eq!(response.predictions, vec![0.73]);
}

#[tokio::test]
async fn test_length_mismatch_rejected_when_validating() {
    let ws = TestWorkspace::with_config(|c| c.prediction.validate_output_length = true);
    let mismatched: Vec<f64> = load_fixture("mismatched_predictions.json");
    let svc = service(&ws, Arc::new(FakeNotebookEngine::returning(mismatched)));

    let request: PredictionRequest = load_fixture("predict_request_pair.json");
    let err = svc.predict(&request.data).await.unwrap_err();
    assert!(matches!(
        err,
        PredictionError::OutputLengthMismatch {
            expected: 2,
            actual: 1
        }
    ));
}

#[tokio::test]
async fn test_engine_failure_surfaces_as_execution_error() {
    let ws = TestWorkspace::new();
    let svc = service(&ws, Arc::new(FakeNotebookEngine::failing("KeyError: 'tenure'")));

    let err = svc
        .predict(&[record(json!({"age": 30}))])
        .await
        .unwrap_err();
    match err {
        PredictionError::Execution(NotebookExecutionError::EngineFailed { stderr, .. }) => {
            assert!(stderr.contains("KeyError"));
        }
        other => panic!("expected EngineFailed, got {other:?}"),
    }
    // The input batch is kept even though the run failed.
    assert_eq!(TestWorkspace::file_names(&ws.input_dir()).len(), 1);
}

#[tokio::test]
async fn test_consecutive_calls_use_distinct_batches() {
    let ws = TestWorkspace::new();
    let svc = service(&ws, Arc::new(FakeNotebookEngine::per_row(0.2)));

    for _ in 0..3 {
        svc.predict(&[record(json!({"age": 30, "tenure": 5}))])
            .await
            .unwrap();
    }
    assert_eq!(TestWorkspace::file_names(&ws.input_dir()).len(), 3);
    assert_eq!(TestWorkspace::file_names(&ws.config.paths.output_dir()).len(), 3);
}

#[tokio::test]
async fn test_records_without_fields_are_rejected() {
    let ws = TestWorkspace::new();
    let engine = Arc::new(FakeNotebookEngine::per_row(0.5));
    let svc = service(&ws, Arc::clone(&engine));

    let err = svc
        .predict(&[record(json!({})), record(json!({}))])
        .await
        .unwrap_err();
    assert!(matches!(err, PredictionError::EmptyFeatures { records: 2 }));
    assert_eq!(engine.call_count(), 0);
    assert!(TestWorkspace::file_names(&ws.input_dir()).is_empty());
}

#[tokio::test]
async fn test_large_integer_ids_are_persisted_exactly() {
    let ws = TestWorkspace::new();
    let svc = service(&ws, Arc::new(FakeNotebookEngine::per_row(0.4)));

    svc.predict(&[record(json!({"customer_id": 9_007_199_254_740_993u64, "age": 30}))])
        .await
        .unwrap();

    let inputs = TestWorkspace::file_names(&ws.input_dir());
    let csv = std::fs::read_to_string(ws.input_dir().join(&inputs[0])).unwrap();
    assert_eq!(csv, "customer_id,age\n9007199254740993,30\n");
}
