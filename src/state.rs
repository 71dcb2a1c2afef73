//! Shared application state for all routes.

use crate::model::Model;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Process-wide pool; every request session borrows one connection from it.
    pub pool: PgPool,
    pub model: Arc<Model>,
}

impl AppState {
    pub fn new(pool: PgPool, model: Model) -> Self {
        AppState {
            pool,
            model: Arc::new(model),
        }
    }
}
