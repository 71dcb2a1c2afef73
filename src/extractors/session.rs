//! Per-request session handle, placed in request extensions by the session middleware.

use crate::error::AppError;
use crate::store::Session;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Clone)]
pub struct DbSession(Arc<Mutex<Session>>);

impl DbSession {
    pub fn new(session: Session) -> Self {
        DbSession(Arc::new(Mutex::new(session)))
    }

    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.0.lock().await
    }

    /// Release the connection. Clones held elsewhere see a closed session.
    pub async fn close(&self) {
        let mut session = self.0.lock().await;
        if session.is_connected() {
            tracing::trace!("returning connection to pool");
        }
        session.close();
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for DbSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<DbSession>()
            .cloned()
            .ok_or(AppError::SessionClosed)
    }
}
