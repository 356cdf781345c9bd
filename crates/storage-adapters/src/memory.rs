//! In-process implementation of `ItemStore` on a concurrent hash map.
//!
//! Each update primitive mutates one entry under that entry's lock, which
//! gives the same atomicity the table's expression-based updates promise:
//! list appends never lose concurrent writers, conditional sets evaluate
//! their guard and apply in one step, and a condition over an absent
//! field is simply false.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{json, Value};
use uuid::Uuid;

use domains::traits::{Item, ItemClass, ItemKey, ItemStore, WriteCondition};
use domains::StoreError;

/// A single-table key-value store held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    items: DashMap<(ItemClass, Uuid), Item>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn missing(key: ItemKey) -> StoreError {
        StoreError::MissingItem {
            class: key.class,
            id: key.item_id,
        }
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn put(&self, key: ItemKey, item: Item) -> Result<(), StoreError> {
        self.items.insert((key.class, key.item_id), item);
        Ok(())
    }

    async fn get(&self, key: ItemKey) -> Result<Option<Item>, StoreError> {
        Ok(self
            .items
            .get(&(key.class, key.item_id))
            .map(|entry| entry.value().clone()))
    }

    async fn scan(&self, class: ItemClass) -> Result<Vec<Item>, StoreError> {
        Ok(self
            .items
            .iter()
            .filter(|entry| entry.key().0 == class)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn update_set(
        &self,
        key: ItemKey,
        fields: Item,
        condition: Option<WriteCondition>,
    ) -> Result<bool, StoreError> {
        let mut entry = self
            .items
            .get_mut(&(key.class, key.item_id))
            .ok_or_else(|| Self::missing(key))?;
        if let Some(WriteCondition::FieldEquals(field, expected)) = condition {
            if entry.get(&field) != Some(&expected) {
                return Ok(false);
            }
        }
        for (field, value) in fields {
            entry.insert(field, value);
        }
        Ok(true)
    }

    async fn update_append(
        &self,
        key: ItemKey,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        let mut entry = self
            .items
            .get_mut(&(key.class, key.item_id))
            .ok_or_else(|| Self::missing(key))?;
        match entry.get_mut(field) {
            Some(Value::Array(list)) => {
                list.push(value);
                Ok(())
            }
            _ => Err(StoreError::FieldShape(field.to_string())),
        }
    }

    async fn update_increment(
        &self,
        key: ItemKey,
        field: &str,
        delta: i64,
    ) -> Result<i64, StoreError> {
        let mut entry = self
            .items
            .get_mut(&(key.class, key.item_id))
            .ok_or_else(|| Self::missing(key))?;
        // An absent attribute is created at the delta, as the table's ADD
        // expression does.
        let updated = match entry.get(field) {
            None => delta,
            Some(Value::Number(current)) => {
                current
                    .as_i64()
                    .ok_or_else(|| StoreError::FieldShape(field.to_string()))?
                    + delta
            }
            Some(_) => return Err(StoreError::FieldShape(field.to_string())),
        };
        entry.insert(field.to_string(), json!(updated));
        Ok(updated)
    }

    async fn update_delete_at(
        &self,
        key: ItemKey,
        field: &str,
        index: usize,
        expected: Option<Value>,
    ) -> Result<bool, StoreError> {
        let mut entry = self
            .items
            .get_mut(&(key.class, key.item_id))
            .ok_or_else(|| Self::missing(key))?;
        let Some(Value::Array(list)) = entry.get_mut(field) else {
            return Err(StoreError::FieldShape(field.to_string()));
        };
        if index >= list.len() {
            return Ok(false);
        }
        if let Some(expected) = &expected {
            if list[index] != *expected {
                return Ok(false);
            }
        }
        list.remove(index);
        Ok(true)
    }

    async fn delete(&self, key: ItemKey) -> Result<(), StoreError> {
        self.items.remove(&(key.class, key.item_id));
        Ok(())
    }
}
