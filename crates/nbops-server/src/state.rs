use std::sync::Arc;

use nbops_core::models::{DriftReport, JobKind};
use nbops_core::{RunIdGenerator, ServiceConfig};
use nbops_engine::notebook::NotebookExecutor;
use nbops_engine::{
    DriftEngine, DriftMonitor, JobHandle, NotebookEngine, PapermillEngine, PredictionService,
    RetrainingService, StatisticalDriftEngine, TaskTracker,
};

use crate::metrics::ServiceMetrics;

/// Shared application state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub prediction: Arc<PredictionService>,
    pub retraining: Arc<RetrainingService>,
    pub drift: Arc<DriftMonitor>,
    pub tasks: TaskTracker,
    pub metrics: Arc<ServiceMetrics>,
}

impl AppState {
    /// Wire the orchestrators around the given engines.
    pub fn new(
        config: Arc<ServiceConfig>,
        notebook_engine: Arc<dyn NotebookEngine>,
        drift_engine: Arc<dyn DriftEngine>,
    ) -> Self {
        let ids = Arc::new(RunIdGenerator::new());
        let executor = Arc::new(NotebookExecutor::new(
            Arc::clone(&config),
            notebook_engine,
            Arc::clone(&ids),
        ));

        Self {
            prediction: Arc::new(PredictionService::new(
                Arc::clone(&config),
                Arc::clone(&executor),
                Arc::clone(&ids),
            )),
            retraining: Arc::new(RetrainingService::new(executor)),
            drift: Arc::new(DriftMonitor::new(Arc::clone(&config), drift_engine, ids)),
            tasks: TaskTracker::new(),
            metrics: Arc::new(ServiceMetrics::new()),
            config,
        }
    }

    /// Production wiring: `papermill` and the statistical drift engine.
    pub fn production(config: Arc<ServiceConfig>) -> Self {
        let notebook_engine = Arc::new(PapermillEngine::from_config(&config.execution));
        let drift_engine = Arc::new(StatisticalDriftEngine::from_config(&config.drift));
        Self::new(config, notebook_engine, drift_engine)
    }

    /// Run a drift check as a background job. The drift gauge follows
    /// every successful check.
    pub fn submit_drift_check(&self) -> JobHandle {
        let monitor = Arc::clone(&self.drift);
        let metrics = Arc::clone(&self.metrics);
        self.tasks.submit(JobKind::DriftCheck, async move {
            let report: DriftReport = monitor.check_drift().await?;
            metrics.set_drift_score(report.drift_score);
            Ok::<_, nbops_core::errors::DriftDetectionError>(report)
        })
    }
}
