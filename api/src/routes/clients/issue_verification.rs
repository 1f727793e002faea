//! Handler for POST /api/v1/clients/{id}/verification

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use ph_core::repositories::{ClientRepository, PrincipalRepository};

use crate::dto::auth::VerificationIssuedResponse;
use crate::handlers::error::handle_domain_error;
use crate::routes::AppState;

/// (Re-)issues a verification ticket for a client.
///
/// Mounted behind `SessionAuth` and `RequireRole(Agency)`. Any ticket
/// already outstanding is discarded, so previously sent links stop
/// working immediately. The new ticket value is handed to the mail
/// collaborator, never returned in the response.
///
/// # Responses
/// - 200: ticket issued
/// - 401: missing or invalid credential
/// - 403: signed in, but not an agency
/// - 404: no such client
/// - 409: client already verified
pub async fn issue_verification<P, C>(
    state: web::Data<AppState<P, C>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    P: PrincipalRepository + 'static,
    C: ClientRepository + 'static,
{
    let client_id = path.into_inner();

    match state.verification_service.issue(client_id).await {
        Ok(ticket) => HttpResponse::Ok().json(VerificationIssuedResponse {
            client_id,
            status: "pending_verification".to_string(),
            expires_at: ticket.expires_at,
        }),
        Err(error) => handle_domain_error(error),
    }
}
