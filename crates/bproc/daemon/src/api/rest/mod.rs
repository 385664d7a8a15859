//! REST API: router, handlers and shared state

pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;
