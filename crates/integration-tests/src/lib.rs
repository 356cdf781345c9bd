//! Shared fixtures for the integration suite.

use std::sync::Arc;

use domains::models::{Identity, Role};
use services::PostService;
use storage_adapters::MemoryItemStore;

/// A post service over a fresh in-process store.
pub fn memory_service() -> PostService {
    PostService::new(Arc::new(MemoryItemStore::new()))
}

pub fn user(name: &str) -> Identity {
    Identity {
        username: name.to_string(),
        role: Role::User,
    }
}

pub fn admin(name: &str) -> Identity {
    Identity {
        username: name.to_string(),
        role: Role::Admin,
    }
}
