//! Capa HTTP (poem): rutas, handlers, respuestas y middleware.
pub mod handlers;
pub mod middleware;
pub mod quote;
pub mod responses;
pub mod routes;

pub use handlers::{AppState, ServiceInfo};
pub use routes::build_app;
