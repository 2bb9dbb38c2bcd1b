//! Outbound order workflow: the consumer of the batch ledger
//!
//! Orders are created in `Processing` and consume stock from caller-chosen
//! batches, one line item per batch. Cancellation and deletion reverse those
//! deductions through the ledger's restore path.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::services::ledger::LedgerService;
use shared::models::OrderStatus;
use shared::validation::{validate_price, validate_quantity};

/// Outbound order service
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
    ledger: LedgerService,
    /// When set, restoration is skipped for orders already marked
    /// `stock_restored`. Off by default: cancelling again after moving the
    /// order out of `Cancelled` then restores a second time.
    guard_double_restore: bool,
}

/// One line of an order request, targeting a specific batch
#[derive(Debug, Deserialize)]
pub struct OrderItemInput {
    pub batch_id: Uuid,
    pub quantity: Decimal,
    pub unit_sale_price: Decimal,
}

/// Input for creating an outbound order
#[derive(Debug, Deserialize)]
pub struct CreateOrderInput {
    pub customer_id: Uuid,
    pub items: Vec<OrderItemInput>,
    /// Accepted as-is when present; computed from the line items otherwise
    pub total_amount: Option<Decimal>,
}

/// Input for a status transition
#[derive(Debug, Deserialize)]
pub struct UpdateStatusInput {
    pub status: OrderStatus,
}

/// Order as listed, with resolved names
#[derive(Debug, Serialize, FromRow)]
pub struct OrderView {
    pub id: Uuid,
    pub transaction_date: NaiveDate,
    pub customer_name: String,
    pub recorded_by: String,
    pub status: String,
    pub total_amount: Decimal,
}

/// Line item as shown in an order detail
#[derive(Debug, Serialize, FromRow)]
pub struct LineItemView {
    pub id: Uuid,
    pub batch_id: Uuid,
    pub fruit_name: String,
    pub quantity_sold: Decimal,
    pub unit_sale_price: Decimal,
}

/// Order with its line items
#[derive(Debug, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: OrderView,
    pub items: Vec<LineItemView>,
}

/// Summary of a created order, echoed to the caller and the audit trail
#[derive(Debug, Serialize)]
pub struct OrderCreated {
    pub order_id: Uuid,
    pub customer_name: String,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub line_item_count: usize,
}

/// Outcome of a status transition
#[derive(Debug, Serialize)]
pub struct StatusUpdated {
    pub order_id: Uuid,
    pub previous_status: OrderStatus,
    pub status: OrderStatus,
    pub stock_restored: bool,
}

#[derive(Debug, FromRow)]
struct OrderRow {
    id: Uuid,
    status: String,
    stock_restored: bool,
}

#[derive(Debug, FromRow)]
struct RestorableItem {
    batch_id: Uuid,
    quantity_sold: Decimal,
}

impl OrderService {
    /// Create a new OrderService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        let ledger = LedgerService::new(db.clone());
        Self {
            db,
            ledger,
            guard_double_restore: config.ledger.guard_double_restore,
        }
    }

    /// Create an outbound order, consuming stock per line item
    ///
    /// All-or-nothing: if any line item fails validation or has insufficient
    /// batch stock, the whole transaction rolls back and no deduction is
    /// retained.
    pub async fn create(&self, user_id: Uuid, input: CreateOrderInput) -> AppResult<OrderCreated> {
        if input.items.is_empty() {
            return Err(AppError::Validation {
                field: "items".to_string(),
                message: "Order must contain at least one item".to_string(),
            });
        }

        for item in &input.items {
            if let Err(msg) = validate_quantity(item.quantity) {
                return Err(AppError::Validation {
                    field: "quantity".to_string(),
                    message: msg.to_string(),
                });
            }
            if let Err(msg) = validate_price(item.unit_sale_price) {
                return Err(AppError::Validation {
                    field: "unit_sale_price".to_string(),
                    message: msg.to_string(),
                });
            }
        }

        let customer_name = sqlx::query_scalar::<_, String>(
            "SELECT name FROM customers WHERE id = $1",
        )
        .bind(input.customer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer".to_string()))?;

        let total_amount = input.total_amount.unwrap_or_else(|| {
            input
                .items
                .iter()
                .map(|i| i.quantity * i.unit_sale_price)
                .sum()
        });

        let mut tx = self.db.begin().await?;

        let order_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO outbound_orders (transaction_date, customer_id, user_id, status, total_amount)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(chrono::Utc::now().date_naive())
        .bind(input.customer_id)
        .bind(user_id)
        .bind(OrderStatus::Processing.as_str())
        .bind(total_amount)
        .fetch_one(&mut *tx)
        .await?;

        let line_item_count = input.items.len();
        for item in input.items {
            self.ledger.consume(&mut tx, item.batch_id, item.quantity).await?;

            sqlx::query(
                r#"
                INSERT INTO outbound_line_items (order_id, batch_id, quantity_sold, unit_sale_price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(order_id)
            .bind(item.batch_id)
            .bind(item.quantity)
            .bind(item.unit_sale_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(OrderCreated {
            order_id,
            customer_name,
            status: OrderStatus::Processing,
            total_amount,
            line_item_count,
        })
    }

    /// List outbound orders, newest first
    pub async fn list(&self) -> AppResult<Vec<OrderView>> {
        let orders = sqlx::query_as::<_, OrderView>(
            r#"
            SELECT o.id, o.transaction_date, c.name AS customer_name,
                   u.full_name AS recorded_by, o.status, o.total_amount
            FROM outbound_orders o
            JOIN customers c ON c.id = o.customer_id
            JOIN users u ON u.id = o.user_id
            ORDER BY o.transaction_date DESC, o.id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(orders)
    }

    /// Get one order with its line items
    pub async fn get(&self, order_id: Uuid) -> AppResult<OrderDetail> {
        let order = sqlx::query_as::<_, OrderView>(
            r#"
            SELECT o.id, o.transaction_date, c.name AS customer_name,
                   u.full_name AS recorded_by, o.status, o.total_amount
            FROM outbound_orders o
            JOIN customers c ON c.id = o.customer_id
            JOIN users u ON u.id = o.user_id
            WHERE o.id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        let items = sqlx::query_as::<_, LineItemView>(
            r#"
            SELECT li.id, li.batch_id, f.name AS fruit_name,
                   li.quantity_sold, li.unit_sale_price
            FROM outbound_line_items li
            JOIN stock_batches b ON b.id = li.batch_id
            JOIN fruit_types f ON f.id = b.fruit_type_id
            WHERE li.order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.db)
        .await?;

        Ok(OrderDetail { order, items })
    }

    /// Transition an order to a new status
    ///
    /// Entering `Cancelled` from any other status restores every line item's
    /// stock before the status field changes; a repeated cancel is a no-op on
    /// stock. All other transitions are plain field updates with no stock
    /// effect, so un-cancelling and cancelling again restores a second time
    /// unless `ledger.guard_double_restore` is enabled.
    pub async fn update_status(
        &self,
        order_id: Uuid,
        new_status: OrderStatus,
    ) -> AppResult<StatusUpdated> {
        let order = self.fetch_order(order_id).await?;
        let previous_status = OrderStatus::parse(&order.status)
            .ok_or_else(|| AppError::Internal(format!("Unknown order status: {}", order.status)))?;

        let mut tx = self.db.begin().await?;

        let mut restored = false;
        if previous_status != OrderStatus::Cancelled && new_status == OrderStatus::Cancelled {
            restored = self.restore_line_items(&mut tx, &order).await?;
        }

        sqlx::query("UPDATE outbound_orders SET status = $2, stock_restored = stock_restored OR $3 WHERE id = $1")
            .bind(order_id)
            .bind(new_status.as_str())
            .bind(restored)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(StatusUpdated {
            order_id,
            previous_status,
            status: new_status,
            stock_restored: restored,
        })
    }

    /// Delete an order, restoring its stock unless already cancelled
    ///
    /// Cancellation already returned the stock, so a cancelled order is
    /// purged without a second restoration. Line items go with the order via
    /// the cascade.
    pub async fn delete(&self, order_id: Uuid) -> AppResult<OrderView> {
        let view = self.get(order_id).await?.order;
        let order = self.fetch_order(order_id).await?;
        let status = OrderStatus::parse(&order.status)
            .ok_or_else(|| AppError::Internal(format!("Unknown order status: {}", order.status)))?;

        let mut tx = self.db.begin().await?;

        if status != OrderStatus::Cancelled {
            self.restore_line_items(&mut tx, &order).await?;
        }

        sqlx::query("DELETE FROM outbound_orders WHERE id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(view)
    }

    /// Restore every line item of an order through the ledger
    ///
    /// Returns whether a restoration actually ran (the idempotency guard may
    /// skip it when enabled and the order was restored before).
    async fn restore_line_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &OrderRow,
    ) -> AppResult<bool> {
        if self.guard_double_restore && order.stock_restored {
            tracing::info!(order_id = %order.id, "Skipping stock restoration: already restored");
            return Ok(false);
        }

        let items = sqlx::query_as::<_, RestorableItem>(
            "SELECT batch_id, quantity_sold FROM outbound_line_items WHERE order_id = $1",
        )
        .bind(order.id)
        .fetch_all(&mut **tx)
        .await?;

        for item in items {
            self.ledger.restore(tx, item.batch_id, item.quantity_sold).await?;
        }

        Ok(true)
    }

    async fn fetch_order(&self, order_id: Uuid) -> AppResult<OrderRow> {
        sqlx::query_as::<_, OrderRow>(
            "SELECT id, status, stock_restored FROM outbound_orders WHERE id = $1",
        )
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))
    }
}
