//! Bounded retry with exponential backoff around a wrapped `ItemStore`.
//!
//! Only transient backend failures are retried. Condition outcomes
//! (`Ok(false)`), missing items, and shape errors pass straight through:
//! those are answers, not outages. Domain logic never retries through
//! this layer; it sits strictly at the store boundary.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::sleep;
use tracing::warn;

use domains::traits::{Item, ItemClass, ItemKey, ItemStore, WriteCondition};
use domains::StoreError;

/// Total attempts per call, including the first.
const DEFAULT_ATTEMPTS: u32 = 3;

/// Delay before the first retry; doubled each further retry.
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(50);

/// Decorator adding bounded backoff retries to any `ItemStore`.
///
/// Assumes the backend reports a failure before applying the write, so a
/// retried call never double-applies.
pub struct RetryingStore<S> {
    inner: S,
    attempts: u32,
    base_delay: Duration,
}

impl<S> RetryingStore<S> {
    pub fn new(inner: S) -> Self {
        Self::with_policy(inner, DEFAULT_ATTEMPTS, DEFAULT_BASE_DELAY)
    }

    pub fn with_policy(inner: S, attempts: u32, base_delay: Duration) -> Self {
        Self {
            inner,
            attempts: attempts.max(1),
            base_delay,
        }
    }
}

macro_rules! retried {
    ($self:ident, $op:literal, $call:expr) => {{
        let mut delay = $self.base_delay;
        let mut attempt = 1;
        loop {
            match $call.await {
                Err(StoreError::Backend(err)) if attempt < $self.attempts => {
                    warn!(op = $op, attempt, %err, "transient store failure, backing off");
                    sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
                other => break other,
            }
        }
    }};
}

#[async_trait]
impl<S: ItemStore> ItemStore for RetryingStore<S> {
    async fn put(&self, key: ItemKey, item: Item) -> Result<(), StoreError> {
        retried!(self, "put", self.inner.put(key, item.clone()))
    }

    async fn get(&self, key: ItemKey) -> Result<Option<Item>, StoreError> {
        retried!(self, "get", self.inner.get(key))
    }

    async fn scan(&self, class: ItemClass) -> Result<Vec<Item>, StoreError> {
        retried!(self, "scan", self.inner.scan(class))
    }

    async fn update_set(
        &self,
        key: ItemKey,
        fields: Item,
        condition: Option<WriteCondition>,
    ) -> Result<bool, StoreError> {
        retried!(
            self,
            "update_set",
            self.inner.update_set(key, fields.clone(), condition.clone())
        )
    }

    async fn update_append(
        &self,
        key: ItemKey,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        retried!(
            self,
            "update_append",
            self.inner.update_append(key, field, value.clone())
        )
    }

    async fn update_increment(
        &self,
        key: ItemKey,
        field: &str,
        delta: i64,
    ) -> Result<i64, StoreError> {
        retried!(
            self,
            "update_increment",
            self.inner.update_increment(key, field, delta)
        )
    }

    async fn update_delete_at(
        &self,
        key: ItemKey,
        field: &str,
        index: usize,
        expected: Option<Value>,
    ) -> Result<bool, StoreError> {
        retried!(
            self,
            "update_delete_at",
            self.inner
                .update_delete_at(key, field, index, expected.clone())
        )
    }

    async fn delete(&self, key: ItemKey) -> Result<(), StoreError> {
        retried!(self, "delete", self.inner.delete(key))
    }
}
