//! Unit tests for the verification service

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::client::{Client, ClientStatus};
use crate::errors::{DomainError, VerificationError};
use crate::repositories::{ClientRepository, MockClientRepository};
use crate::services::verification::{VerificationConfig, VerificationService};

fn test_service() -> (
    VerificationService<MockClientRepository>,
    Arc<MockClientRepository>,
) {
    let clients = Arc::new(MockClientRepository::new());
    let service = VerificationService::new(clients.clone(), VerificationConfig::default());
    (service, clients)
}

async fn seed_client(clients: &MockClientRepository) -> Client {
    let client = Client::new(
        Uuid::new_v4(),
        "Acme Retail".to_string(),
        "ops@acme.example".to_string(),
    );
    clients.create(client.clone()).await.unwrap();
    client
}

#[tokio::test]
async fn test_issue_replaces_outstanding_ticket() {
    let (service, clients) = test_service();
    let client = seed_client(&clients).await;
    let first = client.verification_ticket.as_ref().unwrap().value.clone();

    let second = service.issue(client.id).await.unwrap();

    // only the latest ticket validates; the first is dead although it was
    // never explicitly revoked
    assert!(!service.validate(&first).await.unwrap());
    assert!(service.validate(&second.value).await.unwrap());
}

#[tokio::test]
async fn test_issue_unknown_client_is_not_found() {
    let (service, _) = test_service();

    let err = service.issue(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_consume_flips_status_exactly_once() {
    let (service, clients) = test_service();
    let client = seed_client(&clients).await;
    let ticket = client.verification_ticket.as_ref().unwrap().value.clone();

    let verified = service.consume(&ticket).await.unwrap();
    assert_eq!(verified.status, ClientStatus::Verified);
    assert!(verified.verified_at.is_some());

    // replay with the same value fails; nothing changes
    let err = service.consume(&ticket).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::TicketInvalidOrExpired)
    ));
}

#[tokio::test]
async fn test_consume_expired_ticket_leaves_client_unverified() {
    let (service, clients) = test_service();
    let mut client = seed_client(&clients).await;
    let ticket = client.verification_ticket.as_ref().unwrap().value.clone();

    // push the ticket past its window
    client.verification_ticket.as_mut().unwrap().expires_at =
        chrono::Utc::now() - chrono::Duration::days(1);
    clients.update(client.clone()).await.unwrap();

    let err = service.consume(&ticket).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::TicketInvalidOrExpired)
    ));

    let stored = clients.find_by_id(client.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ClientStatus::Unverified);
    assert!(stored.verified_at.is_none());
}

#[tokio::test]
async fn test_validate_is_read_only() {
    let (service, clients) = test_service();
    let client = seed_client(&clients).await;
    let ticket = client.verification_ticket.as_ref().unwrap().value.clone();

    assert!(service.validate(&ticket).await.unwrap());
    assert!(service.validate(&ticket).await.unwrap());

    let stored = clients.find_by_id(client.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ClientStatus::Unverified);
}

#[tokio::test]
async fn test_issue_after_verification_fails() {
    let (service, clients) = test_service();
    let client = seed_client(&clients).await;
    let ticket = client.verification_ticket.as_ref().unwrap().value.clone();
    service.consume(&ticket).await.unwrap();

    let err = service.issue(client.id).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::AlreadyVerified)
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_consume_has_exactly_one_winner() {
    let (service, clients) = test_service();
    let service = Arc::new(service);
    let client = seed_client(&clients).await;
    let ticket = client.verification_ticket.as_ref().unwrap().value.clone();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = service.clone();
        let ticket = ticket.clone();
        handles.push(tokio::spawn(
            async move { service.consume(&ticket).await },
        ));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(err) => assert!(matches!(
                err,
                DomainError::Verification(VerificationError::TicketInvalidOrExpired)
            )),
        }
    }

    assert_eq!(winners, 1);

    let stored = clients.find_by_id(client.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ClientStatus::Verified);
}
