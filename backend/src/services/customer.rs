//! Customer master data service

use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{conflict_on_unique, AppError, AppResult};
use shared::models::Customer;
use shared::validation::validate_name;

/// Customer service
#[derive(Clone)]
pub struct CustomerService {
    db: PgPool,
}

/// Input for creating a customer
#[derive(Debug, Deserialize)]
pub struct CreateCustomerInput {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
}

/// Input for updating a customer
#[derive(Debug, Deserialize)]
pub struct UpdateCustomerInput {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    address: String,
    phone: Option<String>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            address: row.address,
            phone: row.phone,
        }
    }
}

impl CustomerService {
    /// Create a new CustomerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all customers
    pub async fn list(&self) -> AppResult<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, address, phone FROM customers ORDER BY name ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get one customer
    pub async fn get(&self, id: Uuid) -> AppResult<Customer> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, address, phone FROM customers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer".to_string()))?;

        Ok(row.into())
    }

    /// Register a new customer
    pub async fn create(&self, input: CreateCustomerInput) -> AppResult<Customer> {
        if let Err(msg) = validate_name(&input.name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: msg.to_string(),
            });
        }

        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO customers (name, address, phone)
            VALUES ($1, $2, $3)
            RETURNING id, name, address, phone
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.address)
        .bind(&input.phone)
        .fetch_one(&self.db)
        .await
        .map_err(|e| conflict_on_unique(e, "customer", "A customer with this name already exists"))?;

        Ok(row.into())
    }

    /// Update a customer
    pub async fn update(&self, id: Uuid, input: UpdateCustomerInput) -> AppResult<Customer> {
        let existing = self.get(id).await?;

        let name = input.name.unwrap_or(existing.name);
        let address = input.address.unwrap_or(existing.address);
        let phone = input.phone.or(existing.phone);

        if let Err(msg) = validate_name(&name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: msg.to_string(),
            });
        }

        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            UPDATE customers
            SET name = $2, address = $3, phone = $4
            WHERE id = $1
            RETURNING id, name, address, phone
            "#,
        )
        .bind(id)
        .bind(name.trim())
        .bind(&address)
        .bind(&phone)
        .fetch_one(&self.db)
        .await
        .map_err(|e| conflict_on_unique(e, "customer", "A customer with this name already exists"))?;

        Ok(row.into())
    }

    /// Delete a customer
    pub async fn delete(&self, id: Uuid) -> AppResult<Customer> {
        let existing = self.get(id).await?;

        sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.code().as_deref() == Some("23503") =>
                {
                    AppError::Conflict {
                        resource: "customer".to_string(),
                        message: "Customer still has outbound orders".to_string(),
                    }
                }
                other => AppError::DatabaseError(other),
            })?;

        Ok(existing)
    }
}
