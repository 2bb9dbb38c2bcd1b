//! Intake transaction service
//!
//! Records stock arriving from suppliers. Each intake creates one batch per
//! line through the batch ledger, all inside a single database transaction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::ledger::{LedgerService, RecordIntakeInput};
use shared::models::IntakeTransaction;

/// Intake transaction service
#[derive(Clone)]
pub struct IntakeService {
    db: PgPool,
    ledger: LedgerService,
}

/// One line of an intake request
#[derive(Debug, Deserialize)]
pub struct IntakeItemInput {
    pub fruit_type_id: Uuid,
    pub quantity: Decimal,
    pub quality_grade: Option<String>,
}

/// Input for creating an intake transaction
#[derive(Debug, Deserialize)]
pub struct CreateIntakeInput {
    pub supplier_id: Uuid,
    pub items: Vec<IntakeItemInput>,
    pub total_cost: Option<Decimal>,
    pub intake_date: Option<NaiveDate>,
}

/// Summary of a created intake, echoed to the caller and the audit trail
#[derive(Debug, Serialize)]
pub struct IntakeCreated {
    pub intake: IntakeTransaction,
    pub supplier_name: String,
    pub batch_ids: Vec<Uuid>,
}

/// Batch view nested in an intake listing
#[derive(Debug, Serialize, FromRow)]
pub struct IntakeBatchView {
    #[serde(skip)]
    pub intake_id: Uuid,
    pub batch_id: Uuid,
    pub fruit_name: String,
    pub initial_quantity: Decimal,
    pub current_quantity: Decimal,
    pub quality_grade: Option<String>,
}

/// Intake with supplier, recording officer and nested batches
#[derive(Debug, Serialize)]
pub struct IntakeView {
    pub id: Uuid,
    pub transaction_date: NaiveDate,
    pub supplier_name: String,
    pub recorded_by: String,
    pub total_cost: Decimal,
    pub batches: Vec<IntakeBatchView>,
}

#[derive(Debug, FromRow)]
struct IntakeHeadRow {
    id: Uuid,
    transaction_date: NaiveDate,
    supplier_name: String,
    recorded_by: String,
    total_cost: Decimal,
}

impl IntakeService {
    /// Create a new IntakeService instance
    pub fn new(db: PgPool) -> Self {
        let ledger = LedgerService::new(db.clone());
        Self { db, ledger }
    }

    /// Record an intake transaction with one stock batch per item
    ///
    /// All-or-nothing: the intake row and every batch commit together, or
    /// nothing is written.
    pub async fn create(&self, user_id: Uuid, input: CreateIntakeInput) -> AppResult<IntakeCreated> {
        if input.items.is_empty() {
            return Err(AppError::Validation {
                field: "items".to_string(),
                message: "Intake must contain at least one item".to_string(),
            });
        }

        let supplier_name = sqlx::query_scalar::<_, String>(
            "SELECT name FROM suppliers WHERE id = $1",
        )
        .bind(input.supplier_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))?;

        let total_cost = input.total_cost.unwrap_or(Decimal::ZERO);
        let transaction_date = input
            .intake_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive());

        let mut tx = self.db.begin().await?;

        let intake = sqlx::query_as::<_, (Uuid, NaiveDate, Uuid, Uuid, Decimal)>(
            r#"
            INSERT INTO intake_transactions (transaction_date, supplier_id, user_id, total_cost)
            VALUES ($1, $2, $3, $4)
            RETURNING id, transaction_date, supplier_id, user_id, total_cost
            "#,
        )
        .bind(transaction_date)
        .bind(input.supplier_id)
        .bind(user_id)
        .bind(total_cost)
        .fetch_one(&mut *tx)
        .await?;

        let mut batch_ids = Vec::with_capacity(input.items.len());
        for item in input.items {
            let batch = self
                .ledger
                .record_intake(
                    &mut tx,
                    intake.0,
                    RecordIntakeInput {
                        fruit_type_id: item.fruit_type_id,
                        quantity: item.quantity,
                        quality_grade: item.quality_grade,
                        intake_date: input.intake_date,
                    },
                )
                .await?;
            batch_ids.push(batch.id);
        }

        tx.commit().await?;

        Ok(IntakeCreated {
            intake: IntakeTransaction {
                id: intake.0,
                transaction_date: intake.1,
                supplier_id: intake.2,
                user_id: intake.3,
                total_cost: intake.4,
            },
            supplier_name,
            batch_ids,
        })
    }

    /// List intake transactions, newest first, with their batches
    pub async fn list(&self) -> AppResult<Vec<IntakeView>> {
        let heads = sqlx::query_as::<_, IntakeHeadRow>(
            r#"
            SELECT i.id, i.transaction_date, s.name AS supplier_name,
                   u.full_name AS recorded_by, i.total_cost
            FROM intake_transactions i
            JOIN suppliers s ON s.id = i.supplier_id
            JOIN users u ON u.id = i.user_id
            ORDER BY i.transaction_date DESC, i.id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let mut batches = sqlx::query_as::<_, IntakeBatchView>(
            r#"
            SELECT b.intake_id, b.id AS batch_id, f.name AS fruit_name,
                   b.initial_quantity, b.current_quantity, b.quality_grade
            FROM stock_batches b
            JOIN fruit_types f ON f.id = b.fruit_type_id
            ORDER BY b.created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(heads
            .into_iter()
            .map(|head| {
                let (own, rest): (Vec<_>, Vec<_>) =
                    batches.drain(..).partition(|b| b.intake_id == head.id);
                batches = rest;
                IntakeView {
                    id: head.id,
                    transaction_date: head.transaction_date,
                    supplier_name: head.supplier_name,
                    recorded_by: head.recorded_by,
                    total_cost: head.total_cost,
                    batches: own,
                }
            })
            .collect())
    }
}
