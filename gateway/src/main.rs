use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Result;

mod api;
mod config;
mod error;
mod services;
mod storage;

use config::GatewayConfig;
use mammoscan_pipeline::{
    HttpMlPlatform, ParameterStore, PipelineLauncher, PipelineRunner, RESIZE_ENDPOINT_PARAMETER,
};
use storage::{FileParameterStore, FsObjectStore, ObjectStore};

pub struct AppState {
    pub object_store: Arc<dyn ObjectStore>,
    pub parameters: Arc<dyn ParameterStore>,
    pub launcher: PipelineLauncher,
    pub config: GatewayConfig,
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = GatewayConfig::default();

    // Initialize storage
    let object_store: Arc<dyn ObjectStore> =
        Arc::new(FsObjectStore::new(config.storage.data_dir.clone()));
    let parameters: Arc<dyn ParameterStore> =
        Arc::new(FileParameterStore::new(config.storage.parameters_file.clone()));

    // Wire the orchestration pipeline against the ML platform control API
    let platform = Arc::new(HttpMlPlatform::new(config.platform.control_url.clone()));
    let runner = Arc::new(PipelineRunner::new(
        platform,
        parameters.clone(),
        config.pipeline.clone(),
    ));
    let launcher = PipelineLauncher::new(runner);

    // Publish this gateway's resize address for downstream discovery
    parameters
        .put(RESIZE_ENDPOINT_PARAMETER, &config.resize_endpoint_url())
        .await?;

    let bind_addr = (config.server.host.clone(), config.server.port);

    let app_state = web::Data::new(AppState {
        object_store,
        parameters,
        launcher,
        config,
    });

    let state = app_state.clone();
    let server = HttpServer::new(move || {
        let cors = state
            .config
            .server
            .cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec!["Content-Type", "Authorization"])
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .configure(api::configure)
    })
    .bind(bind_addr)?
    .run();

    tracing::info!(
        "inference gateway started on {}:{}",
        app_state.config.server.host,
        app_state.config.server.port
    );

    server.await?;

    Ok(())
}
