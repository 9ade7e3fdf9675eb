use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{
            LoginRequest, LoginResponse, PublicUser, RefreshResponse, RegisterRequest,
            RegisterResponse,
        },
        extractors::{bearer_token, CurrentUser},
        services::{self, Registration},
    },
    error::AppError,
    extract::ApiJson,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/registro", post(register))
        .route("/auth/acceso", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/usuarios", get(list_users))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let user = services::register(
        &state,
        Registration {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            is_active: payload.es_activo,
            is_admin: payload.es_admin,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            username: user.username,
            mensaje: "Registro correcto".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let pair = services::login(&state, &payload.username, &payload.password).await?;
    Ok(Json(LoginResponse {
        username: payload.username,
        mensaje: "Ingreso aprobado".into(),
        access: pair.access,
        refresh: pair.refresh,
    }))
}

/// The refresh token travels in the `Authorization` header.
#[instrument(skip_all)]
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, AppError> {
    let pair = services::refresh(&state.keys, bearer_token(&headers))?;
    Ok(Json(RefreshResponse {
        access: pair.access,
        refresh: pair.refresh,
    }))
}

#[instrument(skip_all, fields(username = %actor.username))]
pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> Result<Json<Vec<PublicUser>>, AppError> {
    let users = services::list_users(&state, &actor).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}
