use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::{map_insert_error, PgStore},
    orders::{
        model::OrderStatus,
        repo_types::{NewOrder, Order, OrderContents, OrderRow},
    },
};

/// Order store. Update and delete report `None` / `false` when the id is
/// unknown.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Order>>;

    async fn create(&self, order: NewOrder) -> anyhow::Result<Order>;

    async fn list_all(&self) -> anyhow::Result<Vec<Order>>;

    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Order>>;

    async fn update_contents(
        &self,
        id: Uuid,
        contents: OrderContents,
    ) -> anyhow::Result<Option<Order>>;

    async fn update_status(&self, id: Uuid, status: OrderStatus)
        -> anyhow::Result<Option<Order>>;

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

fn convert(rows: Vec<OrderRow>) -> anyhow::Result<Vec<Order>> {
    rows.into_iter().map(Order::try_from).collect()
}

#[async_trait]
impl OrderStore for PgStore {
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, quantity, dish, stew, status, owner_id, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Order::try_from).transpose()
    }

    async fn create(&self, order: NewOrder) -> anyhow::Result<Order> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO orders (quantity, dish, stew, status, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, quantity, dish, stew, status, owner_id, created_at
            "#,
        )
        .bind(order.quantity)
        .bind(order.dish.as_str())
        .bind(order.stew.as_str())
        .bind(OrderStatus::default().as_str())
        .bind(order.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;
        Order::try_from(row)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, quantity, dish, stew, status, owner_id, created_at
            FROM orders
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        convert(rows)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, quantity, dish, stew, status, owner_id, created_at
            FROM orders
            WHERE owner_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        convert(rows)
    }

    async fn update_contents(
        &self,
        id: Uuid,
        contents: OrderContents,
    ) -> anyhow::Result<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            UPDATE orders
               SET quantity = $2, dish = $3, stew = $4
             WHERE id = $1
            RETURNING id, quantity, dish, stew, status, owner_id, created_at
            "#,
        )
        .bind(id)
        .bind(contents.quantity)
        .bind(contents.dish.as_str())
        .bind(contents.stew.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Order::try_from).transpose()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> anyhow::Result<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            UPDATE orders
               SET status = $2
             WHERE id = $1
            RETURNING id, quantity, dish, stew, status, owner_id, created_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Order::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
