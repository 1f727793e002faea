//! Maps domain errors to HTTP responses.
//!
//! Two status families are load-bearing: 401 for a missing or invalid
//! credential, 403 for a valid credential with insufficient role or
//! verification. Bodies are generic per category: the expected role, the
//! codec's reason for rejecting a token, and whether a principal exists
//! are logged here and never serialized. `PrincipalNotFound` renders
//! byte-identically to `AuthenticationFailed`.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use ph_core::errors::{AuthError, DomainError, TokenError, VerificationError};
use ph_shared::types::response::ErrorResponse;

/// Converts a domain error into an HTTP response
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    respond(&error)
}

fn respond(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::NoCredential => {
                HttpResponse::Unauthorized().json(ErrorResponse::new(
                    "authentication_required",
                    "Not authorized, no credential",
                ))
            }
            AuthError::AuthenticationFailed | AuthError::PrincipalNotFound => {
                // internally distinct for logging, externally identical
                log::debug!("authentication denied: {:?}", auth_error);
                HttpResponse::Unauthorized().json(ErrorResponse::new(
                    "not_authorized",
                    "Not authorized",
                ))
            }
            AuthError::RoleMismatch { expected } => {
                log::debug!("access denied: required role {}", expected);
                HttpResponse::Forbidden().json(ErrorResponse::new(
                    "access_denied",
                    "Access denied",
                ))
            }
            AuthError::NotVerified => HttpResponse::Forbidden().json(ErrorResponse::new(
                "verification_required",
                "Access denied. Account verification required",
            )),
        },
        DomainError::Token(token_error) => {
            // codec errors are collapsed by the session layer and should
            // not normally reach this point; never leak the reason
            log::debug!("token error surfaced to handler: {:?}", token_error);
            HttpResponse::Unauthorized().json(ErrorResponse::new(
                "not_authorized",
                "Not authorized",
            ))
        }
        DomainError::Verification(verification_error) => match verification_error {
            VerificationError::TicketInvalidOrExpired => {
                HttpResponse::BadRequest().json(ErrorResponse::new(
                    "invalid_verification_ticket",
                    "Verification link is invalid or has expired",
                ))
            }
            VerificationError::AlreadyVerified => {
                HttpResponse::Conflict().json(ErrorResponse::new(
                    "already_verified",
                    "Account is already verified",
                ))
            }
        },
        DomainError::Validation { message } => HttpResponse::BadRequest().json(
            ErrorResponse::new("validation_error", message.clone()),
        ),
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(
            ErrorResponse::new("not_found", format!("{} not found", resource)),
        ),
        DomainError::Database { message } => {
            log::error!("database error: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "internal_error",
                "An internal error occurred",
            ))
        }
        DomainError::Internal { message } => {
            log::error!("internal error: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "internal_error",
                "An internal error occurred",
            ))
        }
    }
}

fn status_of(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::NoCredential
            | AuthError::AuthenticationFailed
            | AuthError::PrincipalNotFound => StatusCode::UNAUTHORIZED,
            AuthError::RoleMismatch { .. } | AuthError::NotVerified => StatusCode::FORBIDDEN,
        },
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::Verification(VerificationError::TicketInvalidOrExpired) => {
            StatusCode::BAD_REQUEST
        }
        DomainError::Verification(VerificationError::AlreadyVerified) => StatusCode::CONFLICT,
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Domain error wrapper usable as an actix error, for middleware that
/// must short-circuit a request with the standard JSON denial body.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_of(&self.0)
    }

    fn error_response(&self) -> HttpResponse {
        respond(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use ph_core::domain::entities::principal::Role;

    async fn body_of(response: HttpResponse) -> serde_json::Value {
        let body = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[actix_web::test]
    async fn test_credential_failures_are_401() {
        for error in [AuthError::AuthenticationFailed, AuthError::PrincipalNotFound] {
            let response = handle_domain_error(DomainError::Auth(error));
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[actix_web::test]
    async fn test_principal_not_found_is_indistinguishable() {
        let failed = body_of(handle_domain_error(DomainError::Auth(
            AuthError::AuthenticationFailed,
        )))
        .await;
        let missing = body_of(handle_domain_error(DomainError::Auth(
            AuthError::PrincipalNotFound,
        )))
        .await;

        assert_eq!(failed["error"], missing["error"]);
        assert_eq!(failed["message"], missing["message"]);
    }

    #[actix_web::test]
    async fn test_guard_denials_are_403() {
        let role = handle_domain_error(DomainError::Auth(AuthError::RoleMismatch {
            expected: Role::Agency,
        }));
        assert_eq!(role.status(), StatusCode::FORBIDDEN);

        let verified = handle_domain_error(DomainError::Auth(AuthError::NotVerified));
        assert_eq!(verified.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_role_mismatch_body_does_not_name_the_role() {
        let body = body_of(handle_domain_error(DomainError::Auth(
            AuthError::RoleMismatch {
                expected: Role::Agency,
            },
        )))
        .await;

        assert!(!body["message"].as_str().unwrap().contains("agency"));
    }

    #[actix_web::test]
    async fn test_token_errors_collapse_to_401() {
        let response = handle_domain_error(DomainError::Token(TokenError::Expired));
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_of(handle_domain_error(DomainError::Token(
            TokenError::InvalidSignature,
        )))
        .await;
        assert!(!body["message"].as_str().unwrap().contains("signature"));
    }

    #[actix_web::test]
    async fn test_ticket_errors() {
        let invalid = handle_domain_error(DomainError::Verification(
            VerificationError::TicketInvalidOrExpired,
        ));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let conflict =
            handle_domain_error(DomainError::Verification(VerificationError::AlreadyVerified));
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
    }
}
