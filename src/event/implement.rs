/// axum transport for the dispatcher
pub mod webhook;
