//! Sign-in flow over the principal store

use std::sync::Arc;

use crate::domain::value_objects::auth_response::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::PrincipalRepository;
use crate::services::token::TokenService;

/// Authentication service handling password sign-in.
///
/// Unknown email and wrong password are indistinguishable to the caller:
/// both come back as `AuthenticationFailed`, so the endpoint cannot be
/// used to enumerate accounts.
pub struct AuthService<P: PrincipalRepository> {
    principals: Arc<P>,
    tokens: Arc<TokenService>,
}

impl<P: PrincipalRepository> AuthService<P> {
    /// Creates a new authentication service
    pub fn new(principals: Arc<P>, tokens: Arc<TokenService>) -> Self {
        Self { principals, tokens }
    }

    /// Signs a principal in with email and password.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - signed bearer token and its lifetime
    /// * `Err(AuthenticationFailed)` - unknown email or wrong password
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let credentials = match self.principals.find_credentials_by_email(email).await? {
            Some(credentials) => credentials,
            None => {
                tracing::debug!("sign-in attempt for unknown email");
                return Err(AuthError::AuthenticationFailed.into());
            }
        };

        let password_matches =
            bcrypt::verify(password, &credentials.password_hash).map_err(|e| {
                DomainError::Internal {
                    message: format!("Password verification failed: {}", e),
                }
            })?;

        if !password_matches {
            tracing::debug!(principal_id = %credentials.principal.id, "sign-in password mismatch");
            return Err(AuthError::AuthenticationFailed.into());
        }

        let token = self.tokens.issue(credentials.principal.id)?;

        let mut principal = credentials.principal;
        principal.record_login();
        let principal = self.principals.update(principal).await?;

        tracing::info!(principal_id = %principal.id, "principal signed in");
        Ok(AuthResponse::new(
            token,
            self.tokens.expires_in_seconds(),
            principal.role,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::principal::{Principal, Role};
    use crate::repositories::MockPrincipalRepository;
    use crate::services::token::TokenConfig;

    fn test_service() -> (AuthService<MockPrincipalRepository>, Arc<MockPrincipalRepository>, Arc<TokenService>) {
        let principals = Arc::new(MockPrincipalRepository::new());
        let tokens = Arc::new(TokenService::new(TokenConfig::new("auth-test-secret")));
        let service = AuthService::new(principals.clone(), tokens.clone());
        (service, principals, tokens)
    }

    async fn seed_agency(principals: &MockPrincipalRepository, password: &str) -> Principal {
        let principal = Principal::new(
            "owner@studio.example".to_string(),
            "Owner".to_string(),
            Role::Agency,
        );
        let hash = bcrypt::hash(password, 4).unwrap();
        principals.create(principal.clone(), hash).await.unwrap();
        principal
    }

    #[tokio::test]
    async fn test_login_issues_resolvable_token() {
        let (service, principals, tokens) = test_service();
        let principal = seed_agency(&principals, "correct horse").await;

        let response = service.login("owner@studio.example", "correct horse").await.unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.role, Role::Agency);
        assert_eq!(
            tokens.verify_subject(&response.access_token).unwrap(),
            principal.id
        );

        // last sign-in is recorded
        let stored = principals.find_by_id(principal.id).await.unwrap().unwrap();
        assert!(stored.last_login_at.is_some());
    }

    #[tokio::test]
    async fn test_wrong_password_fails() {
        let (service, principals, _) = test_service();
        seed_agency(&principals, "correct horse").await;

        let err = service
            .login("owner@studio.example", "battery staple")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Auth(AuthError::AuthenticationFailed)
        ));
    }

    #[tokio::test]
    async fn test_unknown_email_is_indistinguishable_from_wrong_password() {
        let (service, principals, _) = test_service();
        seed_agency(&principals, "correct horse").await;

        let unknown = service
            .login("nobody@studio.example", "whatever")
            .await
            .unwrap_err();
        let wrong = service
            .login("owner@studio.example", "whatever")
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
    }
}
