use metrics_exporter_prometheus::PrometheusHandle;
use plan_maker::config::PlanningConfig;
use plan_maker::error::AppError;
use plan_maker::workflows::planning::{
    CliPlanWriter, EvaluationConfig, FilePlanStore, PlanningService,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type FileBackedService = PlanningService<FilePlanStore, CliPlanWriter>;

/// Planning service over the configured output directory and LLM command.
pub(crate) fn planning_service(config: &PlanningConfig) -> Result<Arc<FileBackedService>, AppError> {
    let store = Arc::new(FilePlanStore::open(&config.output_dir)?);
    let writer = Arc::new(CliPlanWriter::new(
        config.llm_command.clone(),
        config.llm_timeout,
    ));

    Ok(Arc::new(PlanningService::new(
        store,
        writer,
        EvaluationConfig::default(),
        config.generator.clone(),
    )))
}
