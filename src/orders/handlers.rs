use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::extractors::CurrentUser,
    error::AppError,
    extract::{ApiJson, ApiPath},
    orders::{
        dto::{DeletedResponse, OrderRequest, PlacedOrder, StatusRequest},
        repo_types::{Order, OrderContents},
        services,
    },
    state::AppState,
};

pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/ordenes/", get(list_orders).post(place_order))
        .route("/ordenes", get(list_orders).post(place_order))
        .route("/ordenes/usuario", get(list_my_orders))
        .route("/ordenes/usuario/:id", get(get_my_order))
        .route("/ordenes/usuarios/:id", get(list_user_orders))
        .route(
            "/ordenes/:id",
            get(get_order)
                .put(update_order)
                .patch(update_order_status)
                .delete(delete_order),
        )
}

#[instrument(skip_all, fields(username = %actor.username))]
pub async fn place_order(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ApiJson(body): ApiJson<OrderRequest>,
) -> Result<(StatusCode, Json<PlacedOrder>), AppError> {
    let order = services::place(
        state.orders.as_ref(),
        &actor,
        body.cantidad,
        body.tipo,
        body.guisados,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

#[instrument(skip_all, fields(username = %actor.username))]
pub async fn list_orders(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(services::list_all(state.orders.as_ref(), &actor).await?))
}

#[instrument(skip_all, fields(username = %actor.username))]
pub async fn list_my_orders(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(services::list_mine(state.orders.as_ref(), &actor).await?))
}

#[instrument(skip_all, fields(username = %actor.username))]
pub async fn list_user_orders(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(
        services::list_for_user(state.orders.as_ref(), &actor, id).await?,
    ))
}

#[instrument(skip_all, fields(username = %actor.username))]
pub async fn get_order(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(services::get_any(state.orders.as_ref(), &actor, id).await?))
}

#[instrument(skip_all, fields(username = %actor.username))]
pub async fn get_my_order(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(services::get_own(state.orders.as_ref(), &actor, id).await?))
}

#[instrument(skip_all, fields(username = %actor.username))]
pub async fn update_order(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<OrderRequest>,
) -> Result<Json<Order>, AppError> {
    let contents = OrderContents {
        quantity: body.cantidad,
        dish: body.tipo,
        stew: body.guisados,
    };
    Ok(Json(
        services::update_contents(state.orders.as_ref(), &actor, id, contents).await?,
    ))
}

#[instrument(skip_all, fields(username = %actor.username))]
pub async fn update_order_status(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<StatusRequest>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(
        services::update_status(state.orders.as_ref(), &actor, id, body.estado).await?,
    ))
}

#[instrument(skip_all, fields(username = %actor.username))]
pub async fn delete_order(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    services::delete(state.orders.as_ref(), &actor, id).await?;
    Ok(Json(DeletedResponse {
        mensaje: format!("La orden {id} fue eliminada exitosamente"),
    }))
}
