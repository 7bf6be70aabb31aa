#![warn(clippy::unwrap_used)]
pub(crate) mod utils;

/// Server context, configuration and role resolution
pub mod bot;
/// Constants
pub mod consts;
/// Error handling
mod error;
/// Outbound chat platform api
pub mod http;
/// Data structures
pub mod model;
/// User profile storage
pub mod store;

pub use error::{Error, ErrorKind, Result};

pub mod event;
