use entregas::{
    app::{build_app, serve},
    auth::services::ensure_admin,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "entregas=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = AppState::init().await?;

    if let Some(seed) = app_state.config.admin_seed.clone() {
        if let Err(e) = ensure_admin(
            app_state.users.as_ref(),
            &seed.username,
            &seed.email,
            &seed.password,
        )
        .await
        {
            tracing::warn!(error = %e, username = %seed.username, "admin seeding failed; continuing");
        }
    }

    serve(build_app(app_state)).await
}
