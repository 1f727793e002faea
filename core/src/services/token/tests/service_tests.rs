//! Unit tests for the token service

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TOKEN_EXPIRY_DAYS};
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenConfig, TokenService};

const TEST_SECRET: &str = "test-secret-key-for-token-service";

fn test_service() -> TokenService {
    TokenService::new(TokenConfig::new(TEST_SECRET))
}

/// Encodes arbitrary claims with the test secret, bypassing the service,
/// to fabricate tokens the service would never issue itself.
fn encode_raw(claims: &Claims) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

#[test]
fn test_issue_verify_round_trip() {
    let service = test_service();
    let subject = Uuid::new_v4();

    let token = service.issue(subject).unwrap();
    let claims = service.verify(&token).unwrap();

    assert_eq!(claims.subject_id().unwrap(), subject);
    assert_eq!(service.verify_subject(&token).unwrap(), subject);
}

#[test]
fn test_issued_token_expires_in_thirty_days() {
    let service = test_service();
    let token = service.issue(Uuid::new_v4()).unwrap();
    let claims = service.verify(&token).unwrap();

    assert_eq!(claims.exp - claims.iat, TOKEN_EXPIRY_DAYS * 24 * 60 * 60);
    assert_eq!(service.expires_in_seconds(), TOKEN_EXPIRY_DAYS * 24 * 60 * 60);
}

#[test]
fn test_expired_token_is_rejected() {
    let service = test_service();

    // fabricate a token whose 30-day window elapsed one second ago
    let mut claims = Claims::new(Uuid::new_v4(), TOKEN_EXPIRY_DAYS);
    let now = Utc::now().timestamp();
    claims.iat = now - TOKEN_EXPIRY_DAYS * 24 * 60 * 60 - 1;
    claims.nbf = claims.iat;
    claims.exp = now - 1;
    let token = encode_raw(&claims);

    let err = service.verify(&token).unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::Expired)));
}

#[test]
fn test_tampered_signature_never_verifies() {
    let service = test_service();
    let token = service.issue(Uuid::new_v4()).unwrap();

    // flip one character in the middle of the signature segment
    let (head, signature) = token.rsplit_once('.').unwrap();
    let mut sig: Vec<char> = signature.chars().collect();
    sig[10] = if sig[10] == 'A' { 'B' } else { 'A' };
    let tampered = format!("{}.{}", head, sig.iter().collect::<String>());

    let err = service.verify(&tampered).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::InvalidSignature) | DomainError::Token(TokenError::Malformed)
    ));
}

#[test]
fn test_wrong_secret_is_invalid_signature() {
    let service = test_service();
    let other = TokenService::new(TokenConfig::new("a-completely-different-secret"));

    let token = other.issue(Uuid::new_v4()).unwrap();
    let err = service.verify(&token).unwrap_err();

    assert!(matches!(
        err,
        DomainError::Token(TokenError::InvalidSignature)
    ));
}

#[test]
fn test_garbage_token_is_malformed() {
    let service = test_service();

    let err = service.verify("not-a-token-at-all").unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::Malformed)));
}

#[test]
fn test_wrong_issuer_is_rejected() {
    let service = test_service();

    let mut claims = Claims::new(Uuid::new_v4(), TOKEN_EXPIRY_DAYS);
    claims.iss = "someone-else".to_string();
    let token = encode_raw(&claims);

    assert!(service.verify(&token).is_err());
}

#[test]
fn test_non_uuid_subject_is_malformed() {
    let service = test_service();

    let mut claims = Claims::new(Uuid::new_v4(), TOKEN_EXPIRY_DAYS);
    claims.sub = "not-a-uuid".to_string();
    let token = encode_raw(&claims);

    let err = service.verify_subject(&token).unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::Malformed)));
}
