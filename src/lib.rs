pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use domain::types;

use application::employees::EmployeeService;
use application::orchestrator::Orchestrator;
use application::tools::ToolRegistry;
use cli::Cli;
use config::AppConfig;
use domain::employee::{EMPLOYEE_COLLECTION, JOB_COLLECTION};
use infrastructure::gateway::{CompletionGateway, OpenAiGateway};
use infrastructure::server::{self, ServerState};
use infrastructure::store::{DocumentStore, Filter, MemoryStore};
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    init_tracing();
    info!("Starting hcm-assistant");
    debug!(config = ?cli.config, addr = ?cli.addr, model = ?cli.model, "CLI arguments parsed");

    let mut app_config = AppConfig::load(cli.config.as_deref())?;
    match &cli.config {
        Some(path) => info!(path = %path.display(), "Loaded configuration from file"),
        None => info!("Loaded configuration from default path"),
    }
    apply_cli_overrides(&cli, &mut app_config);

    let gateway = OpenAiGateway::from_config(&app_config.gateway)?;
    if !gateway.has_api_key() {
        warn!(
            env = app_config.gateway.api_key_env.as_str(),
            "No API key found, chat requests will fail until it is set"
        );
    }
    info!(
        model = gateway.default_model(),
        endpoint = app_config.gateway.endpoint.as_str(),
        "Completion gateway ready"
    );
    let gateway: Arc<dyn CompletionGateway> = Arc::new(gateway);

    let registry = ToolRegistry::builtin(gateway.clone(), &app_config.prompts, &app_config.math);
    info!(
        tools = ?registry.catalogue(),
        plan_policy = ?app_config.orchestrator.plan_policy,
        "Tool registry ready"
    );
    let orchestrator = Arc::new(Orchestrator::new(
        gateway,
        app_config.prompts.clone(),
        registry,
        app_config.orchestrator.plan_policy,
    ));

    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    log_collection_counts(store.as_ref()).await?;
    let employees = EmployeeService::new(store);

    let state = Arc::new(ServerState::new(
        orchestrator,
        employees,
        app_config.server.clone(),
    ));
    server::serve(state).await?;
    info!("hcm-assistant finished");
    Ok(())
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .init();
    });
}

fn apply_cli_overrides(cli: &Cli, config: &mut AppConfig) {
    if let Some(addr) = cli.addr {
        info!(%addr, "Overriding bind address based on CLI flag");
        config.server.bind = addr;
    }
    if let Some(model) = &cli.model {
        info!(model = model.as_str(), "Overriding model based on CLI flag");
        config.gateway.model = model.clone();
    }
    if let Some(dir) = &cli.static_dir {
        info!(path = %dir.display(), "Overriding static directory based on CLI flag");
        config.server.static_dir = dir.clone();
    }
}

async fn log_collection_counts(store: &dyn DocumentStore) -> Result<(), Box<dyn Error>> {
    let all = Filter::new();
    let employees = store.count_documents(EMPLOYEE_COLLECTION, &all).await?;
    let jobs = store.count_documents(JOB_COLLECTION, &all).await?;
    info!(employees, jobs, "Document store ready");
    Ok(())
}
