//! Access guard middlewares applied after session authentication.
//!
//! Thin wrappers over the core access predicates. Each guard reads the
//! context attached by `SessionAuth`; a missing context is denied the
//! same way as a failed check. Guards never mutate state and are safe to
//! compose in any order.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use ph_core::domain::entities::principal::Role;
use ph_core::errors::{AuthError, DomainError};
use ph_core::services::access::{require_role, require_verified};

use crate::handlers::error::ApiError;
use crate::middleware::auth::AuthContext;

/// Guard middleware admitting only principals with a specific role
pub struct RequireRole {
    expected: Role,
}

impl RequireRole {
    /// Creates a guard for the given role
    pub fn new(expected: Role) -> Self {
        Self { expected }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            expected: self.expected,
        }))
    }
}

/// Role guard middleware service
pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    expected: Role,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let expected = self.expected;

        Box::pin(async move {
            let check = {
                let extensions = req.extensions();
                match extensions.get::<AuthContext>() {
                    Some(context) => require_role(&context.principal, expected),
                    None => Err(DomainError::Auth(AuthError::RoleMismatch { expected })),
                }
            };

            match check {
                Ok(()) => service.call(req).await,
                Err(error) => Err(ApiError::from(error).into()),
            }
        })
    }
}

/// Guard middleware admitting only verified principals
#[derive(Default)]
pub struct RequireVerified;

impl RequireVerified {
    /// Creates the verified-account guard
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireVerified
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireVerifiedMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireVerifiedMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Verified guard middleware service
pub struct RequireVerifiedMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireVerifiedMiddleware<S>
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
            let check = {
                let extensions = req.extensions();
                match extensions.get::<AuthContext>() {
                    Some(context) => require_verified(&context.principal),
                    None => Err(DomainError::Auth(AuthError::NotVerified)),
                }
            };

            match check {
                Ok(()) => service.call(req).await,
                Err(error) => Err(ApiError::from(error).into()),
            }
        })
    }
}
