mod session;
pub use session::session_per_request;
