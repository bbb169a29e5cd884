//! Handlers invoked directly with fake engines.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use nbops_core::models::{JobKind, JobState, PredictionRequest, TrainingRequest};
use nbops_engine::{DriftEngine, NotebookEngine, StatisticalDriftEngine};
use nbops_server::routes::{drift, health, jobs, metrics, predict, retrain};
use nbops_server::AppState;
use serde_json::json;
use test_fixtures::{load_fixture, CountingDriftEngine, FakeNotebookEngine, TestWorkspace};
use uuid::Uuid;

fn state_with(ws: &TestWorkspace, notebook: FakeNotebookEngine) -> AppState {
    let notebook: Arc<dyn NotebookEngine> = Arc::new(notebook);
    let drift: Arc<dyn DriftEngine> = Arc::new(StatisticalDriftEngine::from_config(&ws.config.drift));
    AppState::new(Arc::clone(&ws.config), notebook, drift)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let ws = TestWorkspace::new();
    let state = state_with(&ws, FakeNotebookEngine::returning(vec![]));

    let Json(health) = health::health_check(State(state)).await;
    assert_eq!(health.status, "healthy");
    assert_eq!(health.service, "Churn Prediction API - v1");
    assert_eq!(health.version, ws.config.server.version);
}

#[tokio::test]
async fn test_predict_success_updates_metrics() {
    let ws = TestWorkspace::new();
    let state = state_with(&ws, FakeNotebookEngine::returning(vec![0.73]));

    let request: PredictionRequest = load_fixture("predict_request.json");
    let Json(response) = predict::predict(State(state.clone()), Ok(Json(request)))
        .await
        .unwrap();

    assert_eq!(response.predictions, vec![0.73]);
    assert_eq!(response.model_version, "v1.0");
    assert_eq!(state.metrics.predictions_total("v1.0"), 1);
    assert_eq!(state.metrics.prediction_errors_total(), 0);
}

#[tokio::test]
async fn test_predict_failure_is_500_with_detail() {
    let ws = TestWorkspace::new();
    let state = state_with(&ws, FakeNotebookEngine::failing("ValueError: bad input"));

    let request: PredictionRequest = load_fixture("predict_request.json");
    let err = predict::predict(State(state.clone()), Ok(Json(request)))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err.detail.starts_with("Failed to execute notebook"));
    assert_eq!(state.metrics.prediction_errors_total(), 1);

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("ValueError: bad input"));
}

#[tokio::test]
async fn test_retrain_acknowledges_before_training_finishes() {
    let ws = TestWorkspace::new();
    let state = state_with(
        &ws,
        FakeNotebookEngine::returning(vec![]).with_delay(Duration::from_secs(2)),
    );

    let request: TrainingRequest = serde_json::from_value(json!({
        "training_data_path": "data/training/churn.csv"
    }))
    .unwrap();
    assert_eq!(request.model_version, "v1.0");

    let started = Instant::now();
    let Json(ack) = retrain::retrain(State(state.clone()), Ok(Json(request)))
        .await
        .unwrap();
    assert!(started.elapsed() < Duration::from_millis(500));
    assert_eq!(ack.status, "training_started");
    assert_eq!(ack.message, "Model retraining initiated in background");

    let record = state.tasks.get(&ack.job_id).unwrap();
    assert_eq!(record.kind, JobKind::Retrain);
    assert!(!record.state.is_terminal());
}

#[tokio::test]
async fn test_check_drift_is_accepted_and_tracked() {
    let ws = TestWorkspace::new();
    ws.install_reference("reference_data.csv");
    ws.install_batch("20240601_120000_000000", "drifted_batch.csv");
    let state = state_with(&ws, FakeNotebookEngine::returning(vec![]));

    let (status, Json(accepted)) = drift::check_drift(State(state.clone())).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(accepted.status, "drift_check_started");

    // Wait for the job through the public status handler.
    let mut record = None;
    for _ in 0..200 {
        let Json(r) = jobs::get_job(State(state.clone()), Ok(Path(accepted.job_id)))
            .await
            .unwrap();
        if r.state.is_terminal() {
            record = Some(r);
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    let record = record.expect("drift job finished");
    assert_eq!(record.state, JobState::Succeeded);
    assert!((state.metrics.drift_score() - 0.6).abs() < 1e-9);
}

#[tokio::test]
async fn test_failed_drift_check_is_recorded_on_the_job() {
    let ws = TestWorkspace::new();
    let state = state_with(&ws, FakeNotebookEngine::returning(vec![]));

    let record = state.submit_drift_check().wait().await.unwrap();
    assert_eq!(record.state, JobState::Failed);
    assert!(record.error.unwrap().contains("Reference dataset not found"));
}

#[tokio::test]
async fn test_drift_report_runs_once_then_reads_artifacts() {
    let ws = TestWorkspace::new();
    ws.install_reference("reference_data.csv");
    ws.install_batch("20240601_120000_000000", "drifted_batch.csv");
    let counting = Arc::new(CountingDriftEngine::new(StatisticalDriftEngine::from_config(
        &ws.config.drift,
    )));
    let notebook: Arc<dyn NotebookEngine> = Arc::new(FakeNotebookEngine::returning(vec![]));
    let state = AppState::new(
        Arc::clone(&ws.config),
        notebook,
        Arc::clone(&counting) as Arc<dyn DriftEngine>,
    );

    let Json(first) = drift::drift_report(State(state.clone())).await.unwrap();
    let Json(second) = drift::drift_report(State(state.clone())).await.unwrap();
    assert_eq!(counting.calls(), 1);
    assert_eq!(first, second);
    assert!(first.drift_detected);
    assert!((state.metrics.drift_score() - first.drift_score).abs() < 1e-12);
}

#[tokio::test]
async fn test_placeholder_report_keeps_the_drift_gauge() {
    let ws = TestWorkspace::new();
    let state = state_with(&ws, FakeNotebookEngine::returning(vec![]));
    state.metrics.set_drift_score(0.6);
    let html = ws.monitoring_dir().join("drift_report_20240101_000000_000000.html");
    std::fs::write(&html, "<html></html>").unwrap();

    let Json(report) = drift::drift_report(State(state.clone())).await.unwrap();
    assert_eq!(report.drift_score, 0.0);
    assert_eq!(report.report_path, html.display().to_string());
    assert!((state.metrics.drift_score() - 0.6).abs() < 1e-12);
}

#[tokio::test]
async fn test_drift_report_failure_is_500() {
    let ws = TestWorkspace::new();
    let state = state_with(&ws, FakeNotebookEngine::returning(vec![]));

    let err = drift::drift_report(State(state)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err.detail.contains("Reference dataset not found"));
}

#[tokio::test]
async fn test_unknown_job_is_404() {
    let ws = TestWorkspace::new();
    let state = state_with(&ws, FakeNotebookEngine::returning(vec![]));

    let err = jobs::get_job(State(state), Ok(Path(Uuid::new_v4())))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    let body = body_json(err.into_response()).await;
    assert!(body["detail"].as_str().unwrap().starts_with("Job "));
}

#[tokio::test]
async fn test_metrics_endpoint_renders_exposition() {
    let ws = TestWorkspace::new();
    let state = state_with(&ws, FakeNotebookEngine::returning(vec![0.73]));
    let request: PredictionRequest = load_fixture("predict_request.json");
    predict::predict(State(state.clone()), Ok(Json(request)))
        .await
        .unwrap();

    let response = metrics::render(State(state)).await.into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("model_predictions_total{model_version=\"v1.0\"} 1"));
    assert!(text.contains("model_prediction_latency_seconds_count 1"));
    assert!(text.contains("model_data_drift_score 0"));
    assert!(text.contains("# TYPE model_accuracy gauge"));
}
