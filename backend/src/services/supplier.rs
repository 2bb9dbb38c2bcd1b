//! Supplier master data service

use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{conflict_on_unique, AppError, AppResult};
use shared::models::Supplier;
use shared::validation::validate_name;

/// Supplier service
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

/// Input for creating a supplier
#[derive(Debug, Deserialize)]
pub struct CreateSupplierInput {
    pub name: String,
    pub address: String,
    pub contact: Option<String>,
}

/// Input for updating a supplier
#[derive(Debug, Deserialize)]
pub struct UpdateSupplierInput {
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, FromRow)]
struct SupplierRow {
    id: Uuid,
    name: String,
    address: String,
    contact: Option<String>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Supplier {
            id: row.id,
            name: row.name,
            address: row.address,
            contact: row.contact,
        }
    }
}

impl SupplierService {
    /// Create a new SupplierService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all suppliers
    pub async fn list(&self) -> AppResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, SupplierRow>(
            "SELECT id, name, address, contact FROM suppliers ORDER BY name ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get one supplier
    pub async fn get(&self, id: Uuid) -> AppResult<Supplier> {
        let row = sqlx::query_as::<_, SupplierRow>(
            "SELECT id, name, address, contact FROM suppliers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))?;

        Ok(row.into())
    }

    /// Register a new supplier
    pub async fn create(&self, input: CreateSupplierInput) -> AppResult<Supplier> {
        if let Err(msg) = validate_name(&input.name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: msg.to_string(),
            });
        }

        let row = sqlx::query_as::<_, SupplierRow>(
            r#"
            INSERT INTO suppliers (name, address, contact)
            VALUES ($1, $2, $3)
            RETURNING id, name, address, contact
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.address)
        .bind(&input.contact)
        .fetch_one(&self.db)
        .await
        .map_err(|e| conflict_on_unique(e, "supplier", "A supplier with this name already exists"))?;

        Ok(row.into())
    }

    /// Update a supplier
    pub async fn update(&self, id: Uuid, input: UpdateSupplierInput) -> AppResult<Supplier> {
        let existing = self.get(id).await?;

        let name = input.name.unwrap_or(existing.name);
        let address = input.address.unwrap_or(existing.address);
        let contact = input.contact.or(existing.contact);

        if let Err(msg) = validate_name(&name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: msg.to_string(),
            });
        }

        let row = sqlx::query_as::<_, SupplierRow>(
            r#"
            UPDATE suppliers
            SET name = $2, address = $3, contact = $4
            WHERE id = $1
            RETURNING id, name, address, contact
            "#,
        )
        .bind(id)
        .bind(name.trim())
        .bind(&address)
        .bind(&contact)
        .fetch_one(&self.db)
        .await
        .map_err(|e| conflict_on_unique(e, "supplier", "A supplier with this name already exists"))?;

        Ok(row.into())
    }

    /// Delete a supplier
    pub async fn delete(&self, id: Uuid) -> AppResult<Supplier> {
        let existing = self.get(id).await?;

        sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.code().as_deref() == Some("23503") =>
                {
                    AppError::Conflict {
                        resource: "supplier".to_string(),
                        message: "Supplier still has intake transactions".to_string(),
                    }
                }
                other => AppError::DatabaseError(other),
            })?;

        Ok(existing)
    }
}
