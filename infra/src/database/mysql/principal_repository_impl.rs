//! MySQL implementation of the PrincipalRepository trait.
//!
//! The `password_hash` column is selected only by the credentials lookup;
//! every other query leaves it out so a principal can never travel with
//! its secret attached.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ph_core::domain::entities::principal::{Principal, PrincipalCredentials, Role};
use ph_core::errors::DomainError;
use ph_core::repositories::PrincipalRepository;

/// MySQL implementation of PrincipalRepository
pub struct MySqlPrincipalRepository {
    /// Database connection pool
    pool: MySqlPool,
}

const PRINCIPAL_COLUMNS: &str =
    "id, email, name, role, is_verified, created_at, updated_at, last_login_at";

impl MySqlPrincipalRepository {
    /// Create a new MySQL principal repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a Principal entity
    fn row_to_principal(row: &sqlx::mysql::MySqlRow) -> Result<Principal, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Database {
                message: format!("Failed to get id: {}", e),
            })?;

        let role_str: String = row
            .try_get("role")
            .map_err(|e| DomainError::Database {
                message: format!("Failed to get role: {}", e),
            })?;
        let role = Role::parse(&role_str).ok_or_else(|| DomainError::Database {
            message: format!("Unknown role value: {}", role_str),
        })?;

        Ok(Principal {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Database {
                message: format!("Failed to get email: {}", e),
            })?,
            name: row.try_get("name").map_err(|e| DomainError::Database {
                message: format!("Failed to get name: {}", e),
            })?,
            role,
            is_verified: row
                .try_get("is_verified")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get is_verified: {}", e),
                })?,
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
            last_login_at: row
                .try_get("last_login_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get last_login_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl PrincipalRepository for MySqlPrincipalRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Principal>, DomainError> {
        let query = format!(
            "SELECT {} FROM principals WHERE id = ? LIMIT 1",
            PRINCIPAL_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_principal(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, DomainError> {
        let query = format!(
            "SELECT {} FROM principals WHERE email = ? LIMIT 1",
            PRINCIPAL_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_principal(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<PrincipalCredentials>, DomainError> {
        let query = format!(
            "SELECT {}, password_hash FROM principals WHERE email = ? LIMIT 1",
            PRINCIPAL_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => {
                let principal = Self::row_to_principal(&row)?;
                let password_hash =
                    row.try_get("password_hash")
                        .map_err(|e| DomainError::Database {
                            message: format!("Failed to get password_hash: {}", e),
                        })?;
                Ok(Some(PrincipalCredentials {
                    principal,
                    password_hash,
                }))
            }
            None => Ok(None),
        }
    }

    async fn create(
        &self,
        principal: Principal,
        password_hash: String,
    ) -> Result<Principal, DomainError> {
        let query = r#"
            INSERT INTO principals (
                id, email, name, role, password_hash,
                is_verified, created_at, updated_at, last_login_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(principal.id.to_string())
            .bind(&principal.email)
            .bind(&principal.name)
            .bind(principal.role.as_str())
            .bind(&password_hash)
            .bind(principal.is_verified)
            .bind(principal.created_at)
            .bind(principal.updated_at)
            .bind(principal.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to create principal: {}", e),
            })?;

        Ok(principal)
    }

    async fn update(&self, principal: Principal) -> Result<Principal, DomainError> {
        let query = r#"
            UPDATE principals
            SET email = ?, name = ?, role = ?, is_verified = ?,
                updated_at = ?, last_login_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&principal.email)
            .bind(&principal.name)
            .bind(principal.role.as_str())
            .bind(principal.is_verified)
            .bind(principal.updated_at)
            .bind(principal.last_login_at)
            .bind(principal.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to update principal: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "Principal".to_string(),
            });
        }

        Ok(principal)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM principals WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to delete principal: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
