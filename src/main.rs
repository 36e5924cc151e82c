use poem::listener::TcpListener;
use poem::Server;
use std::sync::Arc;
use tracing::info;

use ysi_estimator::api::{build_app, AppState, ServiceInfo};
use ysi_estimator::config::AppConfig;
use ysi_estimator::errors::CoreError;
use ysi_estimator::loader::load_model;
use ysi_estimator::logging::init_logger;
use ysi_estimator::providers::toolkit::toolkit_from_config;
use ysi_estimator::service::YsiService;

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    let config = AppConfig::from_env()?;
    init_logger(config.log_format);

    let toolkit = toolkit_from_config(&config)?;
    let loaded = load_model(toolkit.as_ref(), &config.contributions_path, &config.reference_path).await?;
    let info = ServiceInfo::new(toolkit.as_ref(), &loaded);
    let service = YsiService::new(toolkit, Arc::new(loaded.model));

    let app = build_app(AppState { service, info });
    info!(addr = %config.bind_addr, "listening");
    Server::new(TcpListener::bind(config.bind_addr)).run(app).await?;
    Ok(())
}
