//! # api-adapters
//!
//! The HTTP boundary around the core: routing, request-shape validation,
//! bearer-token extraction, and the error-kind → status mapping. No
//! domain invariant lives here.

#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
mod validate;

#[cfg(feature = "web-axum")]
pub use handlers::{router, AppState};
