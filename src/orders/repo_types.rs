use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::orders::model::{Dish, OrderStatus, Stew};

/// Raw `orders` row; choice columns are TEXT.
#[derive(Debug, FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub quantity: i32,
    pub dish: String,
    pub stew: String,
    pub status: String,
    pub owner_id: Uuid,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: Uuid,
    #[serde(rename = "cantidad")]
    pub quantity: i32,
    #[serde(rename = "tipo")]
    pub dish: Dish,
    #[serde(rename = "guisados")]
    pub stew: Stew,
    #[serde(rename = "estado")]
    pub status: OrderStatus,
    #[serde(rename = "id_usuario")]
    pub owner_id: Uuid,
    #[serde(skip)]
    pub created_at: OffsetDateTime,
}

impl TryFrom<OrderRow> for Order {
    type Error = anyhow::Error;

    fn try_from(r: OrderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            quantity: r.quantity,
            dish: r.dish.parse()?,
            stew: r.stew.parse()?,
            status: r.status.parse()?,
            owner_id: r.owner_id,
            created_at: r.created_at,
        })
    }
}

/// Validated input for an order insert.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub owner_id: Uuid,
    pub quantity: i32,
    pub dish: Dish,
    pub stew: Stew,
}

/// Replacement for the owner-editable part of an order.
#[derive(Debug, Clone, Copy)]
pub struct OrderContents {
    pub quantity: i32,
    pub dish: Dish,
    pub stew: Stew,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> OrderRow {
        OrderRow {
            id: Uuid::new_v4(),
            quantity: 2,
            dish: "QUESADILLA".into(),
            stew: "CHAMPIÑONES".into(),
            status: status.into(),
            owner_id: Uuid::new_v4(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn row_converts_to_order() {
        let order = Order::try_from(row("EN RUTA")).unwrap();
        assert_eq!(order.dish, Dish::Quesadilla);
        assert_eq!(order.stew, Stew::Champinones);
        assert_eq!(order.status, OrderStatus::EnRuta);
    }

    #[test]
    fn row_with_unknown_status_fails() {
        assert!(Order::try_from(row("PERDIDO")).is_err());
    }

    #[test]
    fn order_serializes_with_spanish_fields() {
        let order = Order::try_from(row("PROCESANDO")).unwrap();
        let v = serde_json::to_value(&order).unwrap();
        assert_eq!(v["cantidad"], 2);
        assert_eq!(v["tipo"], "QUESADILLA");
        assert_eq!(v["guisados"], "CHAMPIÑONES");
        assert_eq!(v["estado"], "PROCESANDO");
        assert_eq!(v["id_usuario"], order.owner_id.to_string());
        assert!(v.get("created_at").is_none());
    }
}
