//! Batch ledger service: the sole write path for batch and aggregate stock
//!
//! Stock is tracked per intake batch. Every mutation of
//! `stock_batches.current_quantity` and `fruit_types.aggregate_stock` goes
//! through this service so the aggregate invariant (aggregate equals the sum
//! of its batches) is a structural guarantee rather than a convention each
//! call site must remember.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{freshness_status, FreshnessStatus, StockBatch};
use shared::validation::validate_quantity;

/// Ledger service owning batch-level stock movements
#[derive(Clone)]
pub struct LedgerService {
    db: PgPool,
}

/// Input for creating one stock batch on intake
#[derive(Debug, Deserialize)]
pub struct RecordIntakeInput {
    pub fruit_type_id: Uuid,
    pub quantity: Decimal,
    pub quality_grade: Option<String>,
    pub intake_date: Option<NaiveDate>,
}

/// Database row for a stock batch
#[derive(Debug, FromRow)]
struct BatchRow {
    id: Uuid,
    intake_id: Uuid,
    fruit_type_id: Uuid,
    intake_date: NaiveDate,
    initial_quantity: Decimal,
    current_quantity: Decimal,
    quality_grade: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<BatchRow> for StockBatch {
    fn from(row: BatchRow) -> Self {
        StockBatch {
            id: row.id,
            intake_id: row.intake_id,
            fruit_type_id: row.fruit_type_id,
            intake_date: row.intake_date,
            initial_quantity: row.initial_quantity,
            current_quantity: row.current_quantity,
            quality_grade: row.quality_grade,
            created_at: row.created_at,
        }
    }
}

/// Batch joined with its fruit type for listings
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BatchWithFruit {
    pub id: Uuid,
    pub intake_id: Uuid,
    pub fruit_type_id: Uuid,
    pub fruit_name: String,
    pub intake_date: NaiveDate,
    pub initial_quantity: Decimal,
    pub current_quantity: Decimal,
    pub quality_grade: Option<String>,
    pub unit_price: Decimal,
}

/// Result of a consume operation
#[derive(Debug, Clone, Serialize)]
pub struct ConsumedStock {
    pub batch_id: Uuid,
    pub fruit_type_id: Uuid,
    pub quantity: Decimal,
    pub remaining_quantity: Decimal,
}

/// Shelf-life view of a non-empty batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchShelfLife {
    pub batch_id: Uuid,
    pub fruit_name: String,
    pub current_quantity: Decimal,
    pub intake_date: NaiveDate,
    pub shelf_life_days: i32,
    pub days_left: i64,
    pub status: FreshnessStatus,
}

/// Aggregate consistency check result for one fruit type
#[derive(Debug, Clone, Serialize)]
pub struct AggregateCheck {
    pub fruit_type_id: Uuid,
    pub aggregate_stock: Decimal,
    pub batch_sum: Decimal,
    pub consistent: bool,
}

impl LedgerService {
    /// Create a new LedgerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a stock batch for an intake transaction
    ///
    /// Runs inside the caller's transaction so the intake row and all of its
    /// batches commit or roll back together.
    pub async fn record_intake(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        intake_id: Uuid,
        input: RecordIntakeInput,
    ) -> AppResult<StockBatch> {
        if let Err(msg) = validate_quantity(input.quantity) {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: msg.to_string(),
            });
        }

        let fruit_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM fruit_types WHERE id = $1)",
        )
        .bind(input.fruit_type_id)
        .fetch_one(&mut **tx)
        .await?;

        if !fruit_exists {
            return Err(AppError::NotFound("Fruit type".to_string()));
        }

        let intake_date = input
            .intake_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive());

        let batch = sqlx::query_as::<_, BatchRow>(
            r#"
            INSERT INTO stock_batches (
                intake_id, fruit_type_id, intake_date, initial_quantity,
                current_quantity, quality_grade
            )
            VALUES ($1, $2, $3, $4, $4, $5)
            RETURNING id, intake_id, fruit_type_id, intake_date, initial_quantity,
                      current_quantity, quality_grade, created_at
            "#,
        )
        .bind(intake_id)
        .bind(input.fruit_type_id)
        .bind(intake_date)
        .bind(input.quantity)
        .bind(&input.quality_grade)
        .fetch_one(&mut **tx)
        .await?;

        sqlx::query("UPDATE fruit_types SET aggregate_stock = aggregate_stock + $1 WHERE id = $2")
            .bind(input.quantity)
            .bind(input.fruit_type_id)
            .execute(&mut **tx)
            .await?;

        Ok(batch.into())
    }

    /// Deduct stock from one batch for an outbound line item
    ///
    /// The decrement is conditional on sufficient remaining quantity, so two
    /// concurrent sales against the same batch cannot both succeed on a stale
    /// read; the loser observes zero affected rows and fails cleanly.
    pub async fn consume(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        batch_id: Uuid,
        quantity: Decimal,
    ) -> AppResult<ConsumedStock> {
        if let Err(msg) = validate_quantity(quantity) {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: msg.to_string(),
            });
        }

        let updated = sqlx::query_as::<_, (Uuid, Decimal)>(
            r#"
            UPDATE stock_batches
            SET current_quantity = current_quantity - $2
            WHERE id = $1 AND current_quantity >= $2
            RETURNING fruit_type_id, current_quantity
            "#,
        )
        .bind(batch_id)
        .bind(quantity)
        .fetch_optional(&mut **tx)
        .await?;

        let (fruit_type_id, remaining) = match updated {
            Some(row) => row,
            None => {
                // Distinguish a missing batch from an insufficient one
                let available = sqlx::query_scalar::<_, Decimal>(
                    "SELECT current_quantity FROM stock_batches WHERE id = $1",
                )
                .bind(batch_id)
                .fetch_optional(&mut **tx)
                .await?;

                return match available {
                    Some(available) => Err(AppError::InsufficientStock {
                        batch_id,
                        requested: quantity,
                        available,
                    }),
                    None => Err(AppError::NotFound("Batch".to_string())),
                };
            }
        };

        sqlx::query("UPDATE fruit_types SET aggregate_stock = aggregate_stock - $1 WHERE id = $2")
            .bind(quantity)
            .bind(fruit_type_id)
            .execute(&mut **tx)
            .await?;

        Ok(ConsumedStock {
            batch_id,
            fruit_type_id,
            quantity,
            remaining_quantity: remaining,
        })
    }

    /// Return previously consumed stock to its batch
    ///
    /// No upper-bound check against `initial_quantity`; the caller must
    /// invoke this exactly once per line item per cancellation event.
    pub async fn restore(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        batch_id: Uuid,
        quantity: Decimal,
    ) -> AppResult<()> {
        let fruit_type_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE stock_batches
            SET current_quantity = current_quantity + $2
            WHERE id = $1
            RETURNING fruit_type_id
            "#,
        )
        .bind(batch_id)
        .bind(quantity)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Batch".to_string()))?;

        sqlx::query("UPDATE fruit_types SET aggregate_stock = aggregate_stock + $1 WHERE id = $2")
            .bind(quantity)
            .bind(fruit_type_id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// List all batches with their fruit type, FIFO order
    pub async fn list_all(&self) -> AppResult<Vec<BatchWithFruit>> {
        let batches = sqlx::query_as::<_, BatchWithFruit>(
            r#"
            SELECT b.id, b.intake_id, b.fruit_type_id, f.name AS fruit_name,
                   b.intake_date, b.initial_quantity, b.current_quantity,
                   b.quality_grade, f.unit_price
            FROM stock_batches b
            JOIN fruit_types f ON f.id = b.fruit_type_id
            ORDER BY b.intake_date ASC, b.created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(batches)
    }

    /// List batches with remaining stock, oldest intake first (FIFO priority)
    ///
    /// Ties on intake date are broken by creation order. No filtering by
    /// quality or expiry; the caller decides which batches to consume from.
    pub async fn list_available(
        &self,
        fruit_type_id: Option<Uuid>,
    ) -> AppResult<Vec<BatchWithFruit>> {
        let batches = sqlx::query_as::<_, BatchWithFruit>(
            r#"
            SELECT b.id, b.intake_id, b.fruit_type_id, f.name AS fruit_name,
                   b.intake_date, b.initial_quantity, b.current_quantity,
                   b.quality_grade, f.unit_price
            FROM stock_batches b
            JOIN fruit_types f ON f.id = b.fruit_type_id
            WHERE b.current_quantity > 0
              AND ($1::uuid IS NULL OR b.fruit_type_id = $1)
            ORDER BY b.intake_date ASC, b.created_at ASC
            "#,
        )
        .bind(fruit_type_id)
        .fetch_all(&self.db)
        .await?;

        Ok(batches)
    }

    /// Shelf-life report for batches with remaining stock
    pub async fn shelf_life_report(&self) -> AppResult<Vec<BatchShelfLife>> {
        let rows = sqlx::query_as::<_, (Uuid, String, Decimal, NaiveDate, i32)>(
            r#"
            SELECT b.id, f.name, b.current_quantity, b.intake_date, f.shelf_life_days
            FROM stock_batches b
            JOIN fruit_types f ON f.id = b.fruit_type_id
            WHERE b.current_quantity > 0
            ORDER BY b.intake_date ASC, b.created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let today = chrono::Utc::now().date_naive();
        Ok(rows
            .into_iter()
            .map(|(batch_id, fruit_name, current_quantity, intake_date, shelf_life_days)| {
                let age_days = (today - intake_date).num_days();
                BatchShelfLife {
                    batch_id,
                    fruit_name,
                    current_quantity,
                    intake_date,
                    shelf_life_days,
                    days_left: shelf_life_days as i64 - age_days,
                    status: freshness_status(age_days, shelf_life_days),
                }
            })
            .collect())
    }

    /// Reconciliation helper: compare a fruit's cached aggregate against the
    /// sum of its batch quantities
    pub async fn check_consistency(&self, fruit_type_id: Uuid) -> AppResult<AggregateCheck> {
        let row = sqlx::query_as::<_, (Decimal, Decimal)>(
            r#"
            SELECT f.aggregate_stock,
                   COALESCE(SUM(b.current_quantity), 0) AS batch_sum
            FROM fruit_types f
            LEFT JOIN stock_batches b ON b.fruit_type_id = f.id
            WHERE f.id = $1
            GROUP BY f.aggregate_stock
            "#,
        )
        .bind(fruit_type_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Fruit type".to_string()))?;

        Ok(AggregateCheck {
            fruit_type_id,
            aggregate_stock: row.0,
            batch_sum: row.1,
            consistent: row.0 == row.1,
        })
    }
}
