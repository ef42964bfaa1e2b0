use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;

pub type SharedState = Arc<AppState>;

/// Shared application state. The pool is the only connection handle in the
/// process; handlers receive it through this struct instead of a global.
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
}
