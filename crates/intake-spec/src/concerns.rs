use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{HealthConcern, ReferenceCatalog};

/// Hard cap on simultaneously selected concerns.
pub const MAX_SELECTED: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConcernError {
    #[error("health concern {0} does not exist in the reference catalog")]
    UnknownConcern(u32),
    #[error("reorder does not match the current selection")]
    InvalidReorder,
    #[error("a reorder gesture is already in progress")]
    GestureInProgress,
}

/// What a toggle did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The selection is full; the toggle was a silent no-op.
    AtCapacity,
}

impl ToggleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleOutcome::Added => "added",
            ToggleOutcome::Removed => "removed",
            ToggleOutcome::AtCapacity => "at_capacity",
        }
    }
}

/// Bounded multi-select over the health-concern catalog, coupled with a
/// user-ranked priority list.
///
/// `selected` records membership in insertion order; `prioritized` carries
/// the same ids as full records in user-assigned rank order (position 0 is
/// the highest priority). Membership edits never disturb the relative order
/// of the surviving priority entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConcernBoard {
    #[serde(default)]
    selected: Vec<u32>,
    #[serde(default)]
    prioritized: Vec<HealthConcern>,
    #[serde(skip)]
    gesture_active: bool,
}

impl ConcernBoard {
    /// Selects or deselects a concern.
    ///
    /// Unknown ids are rejected before any mutation. Deselecting removes the
    /// id from both views; selecting appends to both, unless the board is at
    /// capacity, in which case nothing changes and `AtCapacity` is returned.
    pub fn toggle(
        &mut self,
        id: u32,
        catalog: &ReferenceCatalog,
    ) -> Result<ToggleOutcome, ConcernError> {
        let concern = catalog.concern(id).ok_or(ConcernError::UnknownConcern(id))?;

        if let Some(position) = self.selected.iter().position(|selected| *selected == id) {
            self.selected.remove(position);
            self.prioritized.retain(|entry| entry.id != id);
            return Ok(ToggleOutcome::Removed);
        }

        if self.selected.len() >= MAX_SELECTED {
            return Ok(ToggleOutcome::AtCapacity);
        }

        self.selected.push(id);
        self.prioritized.push(concern.clone());
        Ok(ToggleOutcome::Added)
    }

    /// Replaces the priority order. `new_order` must be a permutation of the
    /// current priority ids; anything else leaves the board untouched.
    pub fn reorder(&mut self, new_order: &[u32]) -> Result<(), ConcernError> {
        if new_order.len() != self.prioritized.len() {
            return Err(ConcernError::InvalidReorder);
        }

        let mut reordered: Vec<HealthConcern> = Vec::with_capacity(new_order.len());
        for id in new_order {
            if reordered.iter().any(|entry| entry.id == *id) {
                return Err(ConcernError::InvalidReorder);
            }
            let record = self
                .prioritized
                .iter()
                .find(|entry| entry.id == *id)
                .ok_or(ConcernError::InvalidReorder)?;
            reordered.push(record.clone());
        }

        self.prioritized = reordered;
        Ok(())
    }

    pub fn is_at_capacity(&self) -> bool {
        self.selected.len() >= MAX_SELECTED
    }

    pub fn selected(&self) -> &[u32] {
        &self.selected
    }

    pub fn prioritized(&self) -> &[HealthConcern] {
        &self.prioritized
    }

    /// Starts a drag gesture by capturing the current priority order. Only
    /// one gesture may be outstanding at a time; a second `begin_reorder`
    /// before the first commit lands is rejected.
    pub fn begin_reorder(&mut self) -> Result<ReorderGesture, ConcernError> {
        if self.gesture_active {
            return Err(ConcernError::GestureInProgress);
        }
        self.gesture_active = true;
        Ok(ReorderGesture {
            order: self.prioritized.iter().map(|entry| entry.id).collect(),
        })
    }

    /// Applies a gesture's pending order atomically. Consuming the gesture
    /// guarantees at most one commit per gesture; a stale gesture (the
    /// membership changed underneath it) fails as `InvalidReorder` without
    /// mutating the board, and the gesture slot is released either way.
    pub fn commit(&mut self, gesture: ReorderGesture) -> Result<(), ConcernError> {
        self.gesture_active = false;
        self.reorder(&gesture.order)
    }

    /// Releases a gesture without applying it.
    pub fn abandon(&mut self, _gesture: ReorderGesture) {
        self.gesture_active = false;
    }
}

/// Pending reorder state for an in-flight drag gesture. Mutations accumulate
/// here and reach the board only through [`ConcernBoard::commit`].
#[derive(Debug)]
pub struct ReorderGesture {
    order: Vec<u32>,
}

impl ReorderGesture {
    pub fn order(&self) -> &[u32] {
        &self.order
    }

    /// Moves the entry at `from` to position `to`. Out-of-range indices are
    /// ignored and reported as `false`.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.order.len() || to >= self.order.len() {
            return false;
        }
        let id = self.order.remove(from);
        self.order.insert(to, id);
        true
    }

    /// Replaces the pending order wholesale, e.g. from a drag library's
    /// drop callback. Validity is checked at commit time.
    pub fn set_order(&mut self, order: Vec<u32>) {
        self.order = order;
    }
}
