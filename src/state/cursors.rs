use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::MealSlot;
use crate::planner::SelectionCursor;

/// Selection cursors persisted by the caller between requests.
///
/// Keyed by `user:region:slot`. Concurrent writers sharing one store get
/// last-write-wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CursorStore {
    cursors: BTreeMap<String, SelectionCursor>,
}

impl CursorStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(user: &str, region: &str, slot: MealSlot) -> String {
        format!("{}:{}:{}", user, region.to_lowercase(), slot)
    }

    /// Cursor for (user, region, slot), or a fresh one.
    pub fn get(&self, user: &str, region: &str, slot: MealSlot) -> SelectionCursor {
        self.cursors
            .get(&Self::key(user, region, slot))
            .cloned()
            .unwrap_or_default()
    }

    pub fn set(&mut self, user: &str, region: &str, slot: MealSlot, cursor: SelectionCursor) {
        self.cursors.insert(Self::key(user, region, slot), cursor);
    }

    /// Drop every cursor belonging to `user`.
    pub fn clear_user(&mut self, user: &str) -> usize {
        let prefix = format!("{}:", user);
        let before = self.cursors.len();
        self.cursors.retain(|k, _| !k.starts_with(&prefix));
        before - self.cursors.len()
    }

    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }
}
