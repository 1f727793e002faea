//! Handler for POST /api/v1/clients/verify

use actix_web::{web, HttpResponse};
use validator::Validate;

use ph_core::repositories::{ClientRepository, PrincipalRepository};
use ph_shared::types::response::ErrorResponse;

use crate::dto::auth::{VerificationResultResponse, VerifyTicketRequest};
use crate::handlers::error::handle_domain_error;
use crate::routes::AppState;

/// Consumes a verification ticket and promotes the client to verified.
///
/// Public endpoint: the ticket itself is the proof of identity, so no
/// bearer credential is required. Consumption is one-way; replaying a
/// consumed ticket fails.
///
/// # Responses
/// - 200: client verified
/// - 400: ticket unknown, expired, or already consumed
pub async fn verify_client<P, C>(
    state: web::Data<AppState<P, C>>,
    request: web::Json<VerifyTicketRequest>,
) -> HttpResponse
where
    P: PrincipalRepository + 'static,
    C: ClientRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest().json(
            ErrorResponse::new("validation_error", "Invalid request data")
                .with_detail("validation_errors", serde_json::json!(errors)),
        );
    }

    match state.verification_service.consume(&request.ticket).await {
        Ok(client) => HttpResponse::Ok().json(VerificationResultResponse {
            client_id: client.id,
            status: client.status.as_str().to_string(),
            verified_at: client.verified_at,
        }),
        Err(error) => handle_domain_error(error),
    }
}
