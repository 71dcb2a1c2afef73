//! Request extractors.

mod json;
mod session;
pub use json::JsonObject;
pub use session::DbSession;
