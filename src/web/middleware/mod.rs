//! Middleware for the web layer.

pub mod cors;
pub mod panic;

pub use cors::create_cors_layer;
pub use panic::handle_panic;
