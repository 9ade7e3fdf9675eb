//! Who may do what to which order.
//!
//! `can_access` is the single decision point; services call [`authorize`]
//! so a denial always reaches the caller as `AppError::Unauthorized`.

use tracing::warn;
use uuid::Uuid;

use crate::{error::AppError, orders::repo_types::Order};

/// The acting user, as resolved from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub username: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListUsers,
    ListOrders,
    ListUserOrders,
    ListOwnOrders,
    ViewAnyOrder,
    ViewOwnOrder,
    UpdateContents,
    UpdateStatus,
    Delete,
}

/// What the operation targets.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    Collection,
    Order(&'a Order),
}

impl Resource<'_> {
    fn owner(&self) -> Option<Uuid> {
        match self {
            Resource::Collection => None,
            Resource::Order(o) => Some(o.owner_id),
        }
    }
}

pub fn can_access(actor: &Actor, resource: &Resource<'_>, op: Operation) -> bool {
    let owns = resource.owner() == Some(actor.id);
    match op {
        Operation::ListUsers
        | Operation::ListOrders
        | Operation::ListUserOrders
        | Operation::ViewAnyOrder
        | Operation::UpdateStatus => actor.is_admin,
        Operation::ListOwnOrders => true,
        Operation::ViewOwnOrder | Operation::UpdateContents => owns,
        Operation::Delete => actor.is_admin || owns,
    }
}

pub fn authorize(actor: &Actor, resource: &Resource<'_>, op: Operation) -> Result<(), AppError> {
    if can_access(actor, resource, op) {
        return Ok(());
    }
    warn!(username = %actor.username, ?op, "access denied");
    Err(AppError::unauthorized(denial_message(resource, op)))
}

fn denial_message(resource: &Resource<'_>, op: Operation) -> String {
    let id = match resource {
        Resource::Order(o) => o.id.to_string(),
        Resource::Collection => String::new(),
    };
    match op {
        Operation::ViewOwnOrder => format!("La orden con ID {id} no te pertenece"),
        Operation::UpdateContents => {
            format!("No puedes actualizar la orden con ID {id} porque no te pertenece")
        }
        Operation::Delete => format!(
            "No puedes borrar la orden {id} porque no te pertenece y/o no eres administrador"
        ),
        _ => "No eres administrador".to_string(),
    }
}
