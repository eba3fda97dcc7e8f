use sqlx::PgPool;

use roster_config::{CorsConfig, JwtConfig};

use crate::modules::open_persons::store::OpenPersonStore;

/// Shared application state, built once in `main` and handed to the router.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub open_persons: OpenPersonStore,
}

impl AppState {
    pub fn new(db: PgPool, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            db,
            jwt_config,
            cors_config,
            open_persons: OpenPersonStore::seeded(),
        }
    }
}
