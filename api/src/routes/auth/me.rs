//! Handler for GET /api/v1/auth/me

use actix_web::HttpResponse;

use crate::dto::auth::PrincipalResponse;
use crate::middleware::auth::AuthContext;

/// Returns the authenticated principal.
///
/// Mounted behind `SessionAuth`; without a credential the middleware
/// answers 401 before this handler runs.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(PrincipalResponse::from(auth.principal))
}
