//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be used by the binary.
//! The `testing` feature exposes mockall mocks of every port for external
//! test crates.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::Identity;
use crate::AppError;

/// A raw stored item: the attribute map persisted under an [`ItemKey`].
pub type Item = serde_json::Map<String, Value>;

/// Discriminator partitioning heterogeneous records within the one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemClass {
    Post,
    User,
}

impl fmt::Display for ItemClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemClass::Post => f.write_str("post"),
            ItemClass::User => f.write_str("user"),
        }
    }
}

/// Compound key addressing one item in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub class: ItemClass,
    pub item_id: Uuid,
}

impl ItemKey {
    pub fn post(item_id: Uuid) -> Self {
        Self {
            class: ItemClass::Post,
            item_id,
        }
    }
}

/// Precondition attached to a conditional write. Evaluates to false when
/// the named field is absent, matching the backing store's condition
/// expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteCondition {
    FieldEquals(String, Value),
}

/// Data persistence contract: a single table of items keyed by
/// `(class, itemID)` with point ops, filtered scans, and attribute-level
/// atomic updates.
///
/// Every failure surfaces as a [`StoreError`]; condition outcomes are data
/// (`Ok(false)`), not errors.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Writes `item` under `key`, replacing any previous value.
    async fn put(&self, key: ItemKey, item: Item) -> Result<(), StoreError>;

    /// Point lookup. `Ok(None)` when the key holds no item.
    async fn get(&self, key: ItemKey) -> Result<Option<Item>, StoreError>;

    /// Full scan filtered to one class.
    async fn scan(&self, class: ItemClass) -> Result<Vec<Item>, StoreError>;

    /// Sets the given fields on an existing item. With a condition, the
    /// write applies only while the condition holds; returns whether it
    /// was applied.
    async fn update_set(
        &self,
        key: ItemKey,
        fields: Item,
        condition: Option<WriteCondition>,
    ) -> Result<bool, StoreError>;

    /// Atomically appends `value` to the list attribute `field`.
    async fn update_append(&self, key: ItemKey, field: &str, value: Value)
        -> Result<(), StoreError>;

    /// Atomically adds `delta` to the numeric attribute `field`, creating
    /// it at `delta` when absent. Returns the new value.
    async fn update_increment(&self, key: ItemKey, field: &str, delta: i64)
        -> Result<i64, StoreError>;

    /// Atomically removes the element at `index` from the list attribute
    /// `field`. When `expected` is given the removal applies only while the
    /// element at that position equals it; returns whether it was applied.
    /// An out-of-range index is a failed precondition, not an error.
    async fn update_delete_at(
        &self,
        key: ItemKey,
        field: &str,
        index: usize,
        expected: Option<Value>,
    ) -> Result<bool, StoreError>;

    /// Removes the item under `key`, if any.
    async fn delete(&self, key: ItemKey) -> Result<(), StoreError>;
}

/// Identity contract: turns a bearer token into a vouched-for requester.
/// Token issuance and verification internals stay behind this seam.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verifies `token` and yields the identity it carries.
    /// Failures are `AppError::Forbidden`.
    async fn verify(&self, token: &str) -> Result<Identity, AppError>;
}
