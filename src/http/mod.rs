/// Typed chat platform endpoints
pub mod api;
pub mod client;
