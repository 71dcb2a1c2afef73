//! Entity CRUD routes. Parameterized paths resolve the entity by segment, so every entity shares
//! the same handlers. Both slash and no-slash forms are accepted.

use crate::handlers::entity::{create, delete as delete_handler, read, update};
use crate::middleware::session_per_request;
use crate::state::AppState;
use axum::{middleware, routing::get, routing::post, Router};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/:path_segment", post(create))
        .route("/:path_segment/", post(create))
        .route(
            "/:path_segment/:id",
            get(read).patch(update).delete(delete_handler),
        )
        .route(
            "/:path_segment/:id/",
            get(read).patch(update).delete(delete_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_per_request,
        ))
        .with_state(state)
}
