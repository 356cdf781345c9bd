//! # domains
//!
//! Domain models, the error taxonomy, and the port traits every other
//! Chorus crate plugs into. This crate performs no I/O of its own.

pub mod error;
pub mod models;
pub mod traits;

pub use error::{AppError, Result, StoreError};
