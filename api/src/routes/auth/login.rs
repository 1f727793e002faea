//! Handler for POST /api/v1/auth/login

use actix_web::{web, HttpResponse};
use validator::Validate;

use ph_core::repositories::{ClientRepository, PrincipalRepository};
use ph_shared::types::response::ErrorResponse;

use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::error::handle_domain_error;
use crate::routes::AppState;

/// Signs a principal in and returns a bearer token.
///
/// # Responses
/// - 200: token issued
/// - 400: invalid request data
/// - 401: unknown email or wrong password (indistinguishable)
pub async fn login<P, C>(
    state: web::Data<AppState<P, C>>,
    request: web::Json<LoginRequest>,
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

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(auth) => HttpResponse::Ok().json(LoginResponse::from(auth)),
        Err(error) => handle_domain_error(error),
    }
}

#[cfg(test)]
mod tests {
    use crate::dto::auth::LoginRequest;
    use validator::Validate;

    #[test]
    fn test_login_request_rejects_short_password() {
        let request = LoginRequest {
            email: "owner@studio.example".to_string(),
            password: "short".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
