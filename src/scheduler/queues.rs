/*!
 * Scheduler Queues
 * FIFO sequences of process table slots
 */

use crate::core::types::SlotIndex;
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SlotQueue {
    slots: VecDeque<SlotIndex>,
}

impl SlotQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push_back(&mut self, slot: SlotIndex) {
        self.slots.push_back(slot);
    }

    #[inline]
    pub fn pop_front(&mut self) -> Option<SlotIndex> {
        self.slots.pop_front()
    }

    #[inline]
    pub fn front(&self) -> Option<SlotIndex> {
        self.slots.front().copied()
    }

    /// Remove `slot` wherever it sits; returns whether it was present
    pub fn remove(&mut self, slot: SlotIndex) -> bool {
        match self.slots.iter().position(|&s| s == slot) {
            Some(pos) => {
                self.slots.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, slot: SlotIndex) -> bool {
        self.slots.contains(&slot)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = SlotIndex> + '_ {
        self.slots.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<SlotIndex> {
        self.iter().collect()
    }
}

/// Ready and blocked queues
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Queues {
    pub ready: SlotQueue,
    pub blocked: SlotQueue,
}

impl Queues {
    /// Whether `slot` is queued anywhere
    pub fn is_queued(&self, slot: SlotIndex) -> bool {
        self.ready.contains(slot) || self.blocked.contains(slot)
    }
}
