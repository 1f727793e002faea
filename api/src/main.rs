use actix_web::{web, HttpServer};
use log::info;
use std::sync::Arc;

mod app;
mod dto;
mod handlers;
mod middleware;
mod routes;

use ph_core::services::auth::AuthService;
use ph_core::services::session::SessionService;
use ph_core::services::token::{TokenConfig, TokenService};
use ph_core::services::verification::{VerificationConfig, VerificationService};
use ph_infra::database::{create_pool, MySqlClientRepository, MySqlPrincipalRepository};
use ph_shared::config::AppConfig;

use crate::app::create_app;
use crate::routes::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting PortalHub API Server");

    // Load configuration; a missing signing secret aborts startup here,
    // it is never a per-request failure
    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    // Database and repositories
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e))?;
    let principal_repository = Arc::new(MySqlPrincipalRepository::new(pool.clone()));
    let client_repository = Arc::new(MySqlClientRepository::new(pool));

    // Services
    let token_service = Arc::new(TokenService::new(TokenConfig::from(&config.jwt)));
    let auth_service = Arc::new(AuthService::new(
        principal_repository.clone(),
        token_service.clone(),
    ));
    let session_service = Arc::new(SessionService::new(
        principal_repository,
        token_service,
    ));
    let verification_service = Arc::new(VerificationService::new(
        client_repository,
        VerificationConfig::default(),
    ));

    let app_state = web::Data::new(AppState {
        auth_service,
        session_service,
        verification_service,
    });

    let workers = config.server.workers;
    let server = HttpServer::new(move || create_app(app_state.clone()));
    let server = if workers > 0 {
        server.workers(workers)
    } else {
        server
    };

    server.bind(&bind_address)?.run().await
}
