//! Inbound Adapters
//!
//! Drivers of the application layer:
//! - Axum-based HTTP server
//! - Interactive console menu

mod console;
mod handlers;
mod input;
mod server;

pub use console::ConsoleUi;
pub use handlers::AppState;
pub use server::HttpServer;
