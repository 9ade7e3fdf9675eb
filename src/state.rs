use std::sync::Arc;

use crate::auth::jwt::JwtKeys;
use crate::auth::repo::UserStore;
use crate::config::{AppConfig, JwtConfig};
use crate::db::PgStore;
use crate::memory::MemoryStore;
use crate::orders::repo::OrderStore;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub orders: Arc<dyn OrderStore>,
    pub keys: JwtKeys,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Connect to PostgreSQL, run migrations and build the state.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = PgStore::connect(&config.database_url).await?;
        store.migrate().await?;

        let store = Arc::new(store);
        Ok(Self::from_parts(store.clone(), store, config))
    }

    pub fn from_parts(
        users: Arc<dyn UserStore>,
        orders: Arc<dyn OrderStore>,
        config: Arc<AppConfig>,
    ) -> Self {
        let keys = JwtKeys::from_config(&config.jwt);
        Self {
            users,
            orders,
            keys,
            config,
        }
    }

    /// State over an empty in-memory store with a fixed test signing key.
    pub fn fake() -> Self {
        Self::fake_with(|_| {})
    }

    pub fn fake_with(tweak: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig {
            database_url: "memory://".into(),
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                refresh_ttl_minutes: 60,
            },
            allow_admin_registration: false,
            admin_seed: None,
        };
        tweak(&mut config);

        let store = Arc::new(MemoryStore::new());
        Self::from_parts(store.clone(), store, Arc::new(config))
    }
}
