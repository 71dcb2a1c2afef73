//! Response bodies for successful requests.

use axum::Json;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

/// Entity projection, 200 OK.
pub fn projection(data: Value) -> Json<Value> {
    Json(data)
}

/// Fixed acknowledgement after a delete.
pub fn deleted() -> Json<StatusBody> {
    Json(StatusBody { status: "deleted" })
}
