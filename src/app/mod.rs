// HTTP surface over the forecast engine.

pub mod handler;
pub mod server;

pub use handler::{AppState, ErrorResponse};
pub use server::{router, serve, serve_on, shutdown_on_signal};
