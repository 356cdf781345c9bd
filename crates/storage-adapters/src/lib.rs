//! # storage-adapters
//!
//! Implementations of the `ItemStore` port: an in-process memory adapter
//! whose per-entry locking makes the attribute-level update primitives
//! genuinely atomic, and a retrying decorator for transient backend
//! failures.

pub mod memory;
pub mod retry;

pub use memory::MemoryItemStore;
pub use retry::RetryingStore;
