//! # AppError
//!
//! Centralized error handling for the Chorus ecosystem.
//! Every collaborator failure is wrapped into one of these kinds so the
//! boundary layer can map them exhaustively to responses.

use thiserror::Error;
use uuid::Uuid;

use crate::traits::ItemClass;

/// The primary error type for all Chorus operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or out-of-range input (bad flag, bad score, empty patch).
    #[error("{0}")]
    Validation(String),

    /// Referenced post or reply does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Role/ownership rule violated.
    #[error("{0}")]
    Forbidden(String),

    /// Vote-uniqueness violation: the user already voted this way.
    #[error("{0}")]
    Conflict(String),

    /// Underlying persistence call failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// A specialized Result type for Chorus logic.
pub type Result<T> = std::result::Result<T, AppError>;

/// Failures reported by an [`ItemStore`](crate::traits::ItemStore) adapter.
///
/// Kept separate from [`AppError`] so the ports never speak in domain
/// vocabulary; the service layer wraps these via `From`.
#[derive(Error, Debug)]
pub enum StoreError {
    /// An update primitive targeted a key that holds no item.
    #[error("no {class} item with id {id}")]
    MissingItem { class: ItemClass, id: Uuid },

    /// A field named by an update primitive is absent or not the expected
    /// shape (e.g. appending to a non-list attribute).
    #[error("field `{0}` is missing or has the wrong shape")]
    FieldShape(String),

    /// A conditional write kept losing to concurrent writers.
    #[error("conditional write gave up after {0} attempts")]
    Contention(u32),

    /// The backend itself failed (I/O, corrupt item, unavailable).
    #[error("backend failure: {0}")]
    Backend(String),
}
