//! MySQL implementation of the ClientRepository trait.
//!
//! Ticket consumption is a single conditional UPDATE keyed on the current
//! ticket value, so concurrent presentations of the same ticket resolve
//! to exactly one winner inside the database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use std::collections::HashMap;
use uuid::Uuid;

use ph_core::domain::entities::client::{Client, ClientStatus};
use ph_core::domain::value_objects::verification_ticket::VerificationTicket;
use ph_core::errors::DomainError;
use ph_core::repositories::ClientRepository;

/// MySQL implementation of ClientRepository
pub struct MySqlClientRepository {
    /// Database connection pool
    pool: MySqlPool,
}

const CLIENT_COLUMNS: &str = "id, agency_id, name, email, status, \
     verification_ticket, verification_expires, ticket_consumed_at, \
     verified_at, last_login_at, notes, metadata, created_at, updated_at";

impl MySqlClientRepository {
    /// Create a new MySQL client repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a Client entity
    fn row_to_client(row: &sqlx::mysql::MySqlRow) -> Result<Client, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Database {
            message: format!("Failed to get id: {}", e),
        })?;
        let agency_id: String = row
            .try_get("agency_id")
            .map_err(|e| DomainError::Database {
                message: format!("Failed to get agency_id: {}", e),
            })?;

        let status_str: String = row.try_get("status").map_err(|e| DomainError::Database {
            message: format!("Failed to get status: {}", e),
        })?;
        let status = ClientStatus::parse(&status_str).ok_or_else(|| DomainError::Database {
            message: format!("Unknown status value: {}", status_str),
        })?;

        let ticket_value: Option<String> =
            row.try_get("verification_ticket")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get verification_ticket: {}", e),
                })?;
        let ticket_expires: Option<DateTime<Utc>> =
            row.try_get("verification_expires")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get verification_expires: {}", e),
                })?;
        let ticket_consumed: Option<DateTime<Utc>> =
            row.try_get("ticket_consumed_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get ticket_consumed_at: {}", e),
                })?;

        // a ticket exists only while both value and expiry are stored;
        // consumption clears them and leaves just the consumption time
        let verification_ticket = match (ticket_value, ticket_expires) {
            (Some(value), Some(expires_at)) => Some(VerificationTicket {
                value,
                expires_at,
                consumed_at: ticket_consumed,
            }),
            _ => None,
        };

        let metadata_json: Option<String> =
            row.try_get("metadata").map_err(|e| DomainError::Database {
                message: format!("Failed to get metadata: {}", e),
            })?;
        let metadata: HashMap<String, String> = match metadata_json {
            Some(json) => serde_json::from_str(&json).map_err(|e| DomainError::Database {
                message: format!("Invalid metadata JSON: {}", e),
            })?,
            None => HashMap::new(),
        };

        Ok(Client {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid UUID: {}", e),
            })?,
            agency_id: Uuid::parse_str(&agency_id).map_err(|e| DomainError::Database {
                message: format!("Invalid UUID: {}", e),
            })?,
            name: row.try_get("name").map_err(|e| DomainError::Database {
                message: format!("Failed to get name: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Database {
                message: format!("Failed to get email: {}", e),
            })?,
            status,
            verification_ticket,
            verified_at: row
                .try_get("verified_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get verified_at: {}", e),
                })?,
            last_login_at: row
                .try_get("last_login_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get last_login_at: {}", e),
                })?,
            notes: row.try_get("notes").map_err(|e| DomainError::Database {
                message: format!("Failed to get notes: {}", e),
            })?,
            metadata,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }

    fn metadata_json(client: &Client) -> Result<String, DomainError> {
        serde_json::to_string(&client.metadata).map_err(|e| DomainError::Internal {
            message: format!("Failed to serialize metadata: {}", e),
        })
    }
}

#[async_trait]
impl ClientRepository for MySqlClientRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, DomainError> {
        let query = format!("SELECT {} FROM clients WHERE id = ? LIMIT 1", CLIENT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_client(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_ticket(&self, ticket_value: &str) -> Result<Option<Client>, DomainError> {
        let query = format!(
            "SELECT {} FROM clients WHERE verification_ticket = ? LIMIT 1",
            CLIENT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(ticket_value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_client(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, client: Client) -> Result<Client, DomainError> {
        let query = r#"
            INSERT INTO clients (
                id, agency_id, name, email, status,
                verification_ticket, verification_expires, ticket_consumed_at,
                verified_at, last_login_at, notes, metadata,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let ticket = client.verification_ticket.as_ref();

        sqlx::query(query)
            .bind(client.id.to_string())
            .bind(client.agency_id.to_string())
            .bind(&client.name)
            .bind(&client.email)
            .bind(client.status.as_str())
            .bind(ticket.map(|t| t.value.as_str()))
            .bind(ticket.map(|t| t.expires_at))
            .bind(ticket.and_then(|t| t.consumed_at))
            .bind(client.verified_at)
            .bind(client.last_login_at)
            .bind(&client.notes)
            .bind(Self::metadata_json(&client)?)
            .bind(client.created_at)
            .bind(client.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to create client: {}", e),
            })?;

        Ok(client)
    }

    async fn update(&self, client: Client) -> Result<Client, DomainError> {
        let query = r#"
            UPDATE clients
            SET name = ?, email = ?, status = ?,
                verification_ticket = ?, verification_expires = ?, ticket_consumed_at = ?,
                verified_at = ?, last_login_at = ?, notes = ?, metadata = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let ticket = client.verification_ticket.as_ref();

        let result = sqlx::query(query)
            .bind(&client.name)
            .bind(&client.email)
            .bind(client.status.as_str())
            .bind(ticket.map(|t| t.value.as_str()))
            .bind(ticket.map(|t| t.expires_at))
            .bind(ticket.and_then(|t| t.consumed_at))
            .bind(client.verified_at)
            .bind(client.last_login_at)
            .bind(&client.notes)
            .bind(Self::metadata_json(&client)?)
            .bind(client.updated_at)
            .bind(client.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to update client: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "Client".to_string(),
            });
        }

        Ok(client)
    }

    async fn consume_ticket(
        &self,
        client_id: Uuid,
        presented: &str,
    ) -> Result<bool, DomainError> {
        let now = Utc::now();

        // conditional read-modify-write: the WHERE clause re-checks value,
        // consumption, and expiry inside the database, so the loser of a
        // race matches zero rows
        let query = r#"
            UPDATE clients
            SET status = 'verified',
                verified_at = ?,
                ticket_consumed_at = ?,
                verification_ticket = NULL,
                verification_expires = NULL,
                updated_at = ?
            WHERE id = ?
              AND verification_ticket = ?
              AND ticket_consumed_at IS NULL
              AND verification_expires > ?
        "#;

        let result = sqlx::query(query)
            .bind(now)
            .bind(now)
            .bind(now)
            .bind(client_id.to_string())
            .bind(presented)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to consume ticket: {}", e),
            })?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to delete client: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
