use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::orders::{
    model::{Dish, OrderStatus, Stew},
    repo_types::Order,
};

/// Body of `POST /ordenes/` and `PUT /ordenes/{id}`. Any `estado`, `id` or
/// `id_usuario` sent along is ignored.
#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    pub cantidad: i32,
    pub guisados: Stew,
    pub tipo: Dish,
}

/// Body of `PATCH /ordenes/{id}`.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub estado: OrderStatus,
}

/// Placement response; the owner id is left out.
#[derive(Debug, Serialize)]
pub struct PlacedOrder {
    pub id: Uuid,
    pub cantidad: i32,
    pub estado: OrderStatus,
    pub guisados: Stew,
    pub tipo: Dish,
}

impl From<Order> for PlacedOrder {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            cantidad: o.quantity,
            estado: o.status,
            guisados: o.stew,
            tipo: o.dish,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub mensaje: String,
}
