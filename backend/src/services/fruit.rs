//! Fruit type master data service

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{conflict_on_unique, AppError, AppResult};
use shared::models::FruitType;
use shared::validation::{validate_name, validate_price, validate_shelf_life, validate_unit};

/// Fruit type service
#[derive(Clone)]
pub struct FruitService {
    db: PgPool,
}

/// Input for creating a fruit type
#[derive(Debug, Deserialize)]
pub struct CreateFruitInput {
    pub name: String,
    pub unit: String,
    pub shelf_life_days: i32,
    pub unit_price: Option<Decimal>,
}

/// Input for updating a fruit type
///
/// `aggregate_stock` is deliberately absent: the cached total is owned by the
/// batch ledger and cannot be written through this path.
#[derive(Debug, Deserialize)]
pub struct UpdateFruitInput {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub shelf_life_days: Option<i32>,
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, FromRow)]
struct FruitRow {
    id: Uuid,
    name: String,
    unit: String,
    shelf_life_days: i32,
    unit_price: Decimal,
    aggregate_stock: Decimal,
}

impl From<FruitRow> for FruitType {
    fn from(row: FruitRow) -> Self {
        FruitType {
            id: row.id,
            name: row.name,
            unit: row.unit,
            shelf_life_days: row.shelf_life_days,
            unit_price: row.unit_price,
            aggregate_stock: row.aggregate_stock,
        }
    }
}

const COLUMNS: &str = "id, name, unit, shelf_life_days, unit_price, aggregate_stock";

impl FruitService {
    /// Create a new FruitService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all fruit types
    pub async fn list(&self) -> AppResult<Vec<FruitType>> {
        let rows = sqlx::query_as::<_, FruitRow>(&format!(
            "SELECT {} FROM fruit_types ORDER BY name ASC",
            COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get one fruit type
    pub async fn get(&self, id: Uuid) -> AppResult<FruitType> {
        let row = sqlx::query_as::<_, FruitRow>(&format!(
            "SELECT {} FROM fruit_types WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Fruit type".to_string()))?;

        Ok(row.into())
    }

    /// Register a new fruit type with zero stock
    pub async fn create(&self, input: CreateFruitInput) -> AppResult<FruitType> {
        Self::validate(&input.name, &input.unit, input.shelf_life_days, input.unit_price)?;

        let unit_price = input.unit_price.unwrap_or(Decimal::ZERO);

        let row = sqlx::query_as::<_, FruitRow>(&format!(
            r#"
            INSERT INTO fruit_types (name, unit, shelf_life_days, unit_price)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(input.name.trim())
        .bind(input.unit.trim())
        .bind(input.shelf_life_days)
        .bind(unit_price)
        .fetch_one(&self.db)
        .await
        .map_err(|e| conflict_on_unique(e, "fruit_type", "A fruit type with this name already exists"))?;

        Ok(row.into())
    }

    /// Update a fruit type's master fields
    pub async fn update(&self, id: Uuid, input: UpdateFruitInput) -> AppResult<FruitType> {
        let existing = self.get(id).await?;

        let name = input.name.unwrap_or(existing.name);
        let unit = input.unit.unwrap_or(existing.unit);
        let shelf_life_days = input.shelf_life_days.unwrap_or(existing.shelf_life_days);
        let unit_price = input.unit_price.unwrap_or(existing.unit_price);

        Self::validate(&name, &unit, shelf_life_days, Some(unit_price))?;

        let row = sqlx::query_as::<_, FruitRow>(&format!(
            r#"
            UPDATE fruit_types
            SET name = $2, unit = $3, shelf_life_days = $4, unit_price = $5
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(name.trim())
        .bind(unit.trim())
        .bind(shelf_life_days)
        .bind(unit_price)
        .fetch_one(&self.db)
        .await
        .map_err(|e| conflict_on_unique(e, "fruit_type", "A fruit type with this name already exists"))?;

        Ok(row.into())
    }

    /// Delete a fruit type
    ///
    /// Fails with Conflict while stock batches still reference it.
    pub async fn delete(&self, id: Uuid) -> AppResult<FruitType> {
        let existing = self.get(id).await?;

        sqlx::query("DELETE FROM fruit_types WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.code().as_deref() == Some("23503") =>
                {
                    AppError::Conflict {
                        resource: "fruit_type".to_string(),
                        message: "Fruit type still has stock batches".to_string(),
                    }
                }
                other => AppError::DatabaseError(other),
            })?;

        Ok(existing)
    }

    fn validate(
        name: &str,
        unit: &str,
        shelf_life_days: i32,
        unit_price: Option<Decimal>,
    ) -> AppResult<()> {
        if let Err(msg) = validate_name(name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: msg.to_string(),
            });
        }
        if let Err(msg) = validate_unit(unit) {
            return Err(AppError::Validation {
                field: "unit".to_string(),
                message: msg.to_string(),
            });
        }
        if let Err(msg) = validate_shelf_life(shelf_life_days) {
            return Err(AppError::Validation {
                field: "shelf_life_days".to_string(),
                message: msg.to_string(),
            });
        }
        if let Some(price) = unit_price {
            if let Err(msg) = validate_price(price) {
                return Err(AppError::Validation {
                    field: "unit_price".to_string(),
                    message: msg.to_string(),
                });
            }
        }
        Ok(())
    }
}
