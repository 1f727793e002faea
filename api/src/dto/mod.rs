//! Request and response data transfer objects.

pub mod auth;

pub use auth::{
    LoginRequest, LoginResponse, PrincipalResponse, VerificationIssuedResponse,
    VerificationResultResponse, VerifyTicketRequest,
};
