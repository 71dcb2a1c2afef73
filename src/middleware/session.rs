//! Session per request: open before the handler, close after the response on every path.
//! Opening only creates the handle; the pool is not touched until a handler reads or commits.

use crate::extractors::DbSession;
use crate::state::AppState;
use crate::store::Session;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

pub async fn session_per_request(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = DbSession::new(Session::open(&state.pool));
    request.extensions_mut().insert(session.clone());
    let response = next.run(request).await;
    session.close().await;
    response
}
