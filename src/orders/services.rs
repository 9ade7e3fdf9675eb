use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::AppError,
    orders::{
        model::{Dish, OrderStatus, Stew},
        repo::OrderStore,
        repo_types::{NewOrder, Order, OrderContents},
    },
    policy::{authorize, Actor, Operation, Resource},
};

fn check_quantity(quantity: i32) -> Result<(), AppError> {
    if quantity <= 0 {
        warn!(quantity, "non-positive quantity");
        return Err(AppError::validation("La cantidad debe ser mayor que cero"));
    }
    Ok(())
}

async fn load(store: &dyn OrderStore, id: Uuid) -> Result<Order, AppError> {
    store
        .find(id)
        .await?
        .ok_or_else(|| AppError::order_not_found(id))
}

#[instrument(skip(store, owner), fields(username = %owner.username))]
pub async fn place(
    store: &dyn OrderStore,
    owner: &Actor,
    quantity: i32,
    dish: Dish,
    stew: Stew,
) -> Result<Order, AppError> {
    check_quantity(quantity)?;
    let order = store
        .create(NewOrder {
            owner_id: owner.id,
            quantity,
            dish,
            stew,
        })
        .await?;
    info!(order_id = %order.id, "order placed");
    Ok(order)
}

#[instrument(skip(store, actor, contents), fields(username = %actor.username))]
pub async fn update_contents(
    store: &dyn OrderStore,
    actor: &Actor,
    order_id: Uuid,
    contents: OrderContents,
) -> Result<Order, AppError> {
    let order = load(store, order_id).await?;
    authorize(actor, &Resource::Order(&order), Operation::UpdateContents)?;
    check_quantity(contents.quantity)?;

    // Deleted between the read and the write.
    let updated = store
        .update_contents(order_id, contents)
        .await?
        .ok_or_else(|| AppError::order_not_found(order_id))?;
    info!(%order_id, "order contents updated");
    Ok(updated)
}

/// Any status may follow any other.
#[instrument(skip(store, actor), fields(username = %actor.username))]
pub async fn update_status(
    store: &dyn OrderStore,
    actor: &Actor,
    order_id: Uuid,
    status: OrderStatus,
) -> Result<Order, AppError> {
    authorize(actor, &Resource::Collection, Operation::UpdateStatus)?;
    let updated = store
        .update_status(order_id, status)
        .await?
        .ok_or_else(|| AppError::order_not_found(order_id))?;
    info!(%order_id, %status, "order status updated");
    Ok(updated)
}

#[instrument(skip(store, actor), fields(username = %actor.username))]
pub async fn delete(store: &dyn OrderStore, actor: &Actor, order_id: Uuid) -> Result<(), AppError> {
    let order = load(store, order_id).await?;
    authorize(actor, &Resource::Order(&order), Operation::Delete)?;
    if !store.delete(order_id).await? {
        return Err(AppError::order_not_found(order_id));
    }
    info!(%order_id, "order deleted");
    Ok(())
}

pub async fn list_all(store: &dyn OrderStore, actor: &Actor) -> Result<Vec<Order>, AppError> {
    authorize(actor, &Resource::Collection, Operation::ListOrders)?;
    Ok(store.list_all().await?)
}

pub async fn list_mine(store: &dyn OrderStore, actor: &Actor) -> Result<Vec<Order>, AppError> {
    authorize(actor, &Resource::Collection, Operation::ListOwnOrders)?;
    Ok(store.list_by_owner(actor.id).await?)
}

pub async fn list_for_user(
    store: &dyn OrderStore,
    actor: &Actor,
    user_id: Uuid,
) -> Result<Vec<Order>, AppError> {
    authorize(actor, &Resource::Collection, Operation::ListUserOrders)?;
    Ok(store.list_by_owner(user_id).await?)
}

/// Admin read path.
pub async fn get_any(store: &dyn OrderStore, actor: &Actor, order_id: Uuid) -> Result<Order, AppError> {
    authorize(actor, &Resource::Collection, Operation::ViewAnyOrder)?;
    load(store, order_id).await
}

/// Owner read path.
pub async fn get_own(store: &dyn OrderStore, actor: &Actor, order_id: Uuid) -> Result<Order, AppError> {
    let order = load(store, order_id).await?;
    authorize(actor, &Resource::Order(&order), Operation::ViewOwnOrder)?;
    Ok(order)
}
