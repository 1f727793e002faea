//! Session authentication middleware for protecting API endpoints.
//!
//! Extracts the bearer credential from the Authorization header, resolves
//! it to a principal through the core session service, and injects the
//! principal into the request context. Any failure terminates the request
//! with a 401 before handler logic runs; the response never says why the
//! credential was rejected.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use ph_core::domain::entities::principal::Principal;
use ph_core::errors::{AuthError, DomainError};
use ph_core::repositories::PrincipalRepository;
use ph_core::services::session::SessionService;

use crate::handlers::error::ApiError;

/// Authenticated context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The resolved principal, credential excluded
    pub principal: Principal,
}

/// Trait for wrapping SessionService to allow dynamic dispatch from the
/// middleware, which cannot be generic over the repository type.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    async fn resolve_principal(
        &self,
        authorization: Option<&str>,
    ) -> Result<Principal, DomainError>;
}

#[async_trait]
impl<P: PrincipalRepository + 'static> SessionResolver for SessionService<P> {
    async fn resolve_principal(
        &self,
        authorization: Option<&str>,
    ) -> Result<Principal, DomainError> {
        self.resolve(authorization).await
    }
}

/// Session authentication middleware factory
#[derive(Default)]
pub struct SessionAuth;

impl SessionAuth {
    /// Creates the middleware; the resolver is taken from app data
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Session authentication middleware service
pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let resolver = match req.app_data::<web::Data<Arc<dyn SessionResolver>>>() {
                Some(resolver) => resolver.get_ref().clone(),
                None => {
                    log::error!("SessionAuth mounted without a session resolver in app data");
                    return Err(ApiError::from(DomainError::Internal {
                        message: "Session resolver not configured".to_string(),
                    })
                    .into());
                }
            };

            let authorization = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok());

            match resolver.resolve_principal(authorization).await {
                Ok(principal) => {
                    req.extensions_mut().insert(AuthContext { principal });
                    service.call(req).await
                }
                Err(error) => Err(ApiError::from(error).into()),
            }
        })
    }
}

/// Extractor for the authenticated context attached by `SessionAuth`
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| Error::from(ApiError::from(DomainError::Auth(AuthError::NoCredential))));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::test;
    use ph_core::services::session::parse_bearer;

    #[actix_web::test]
    async fn test_header_value_reaches_parser_untouched() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();

        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        assert_eq!(parse_bearer(header), Some("test_token_123"));
    }
}
