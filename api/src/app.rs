//! Application factory
//!
//! Builds the Actix-web application from a pre-wired state. Guard
//! middlewares are applied per route; actix runs the last `wrap` first,
//! so `SessionAuth` is registered after any guard that consumes its
//! context.

use actix_web::{middleware::Logger, web, App, HttpResponse};
use std::sync::Arc;

use crate::middleware::auth::{SessionAuth, SessionResolver};
use crate::middleware::cors::create_cors;
use crate::middleware::guards::RequireRole;
use crate::routes::auth::{login, me};
use crate::routes::clients::{issue_verification, verify_client};
use crate::routes::AppState;

use ph_core::domain::entities::principal::Role;
use ph_core::repositories::{ClientRepository, PrincipalRepository};

/// Create and configure the application with all dependencies
pub fn create_app<P, C>(
    app_state: web::Data<AppState<P, C>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    P: PrincipalRepository + 'static,
    C: ClientRepository + 'static,
{
    // the middleware resolves sessions through a trait object
    let session_resolver: Arc<dyn SessionResolver> = app_state.session_service.clone();

    let cors = create_cors();

    App::new()
        // Add application state
        .app_data(app_state.clone())
        .app_data(web::Data::new(session_resolver))
        // Add middleware
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(login::<P, C>))
                        .route("/me", web::get().to(me).wrap(SessionAuth::new())),
                )
                .service(
                    web::scope("/clients")
                        .route("/verify", web::post().to(verify_client::<P, C>))
                        .route(
                            "/{id}/verification",
                            web::post()
                                .to(issue_verification::<P, C>)
                                .wrap(RequireRole::new(Role::Agency))
                                .wrap(SessionAuth::new()),
                        ),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "portal-hub-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
