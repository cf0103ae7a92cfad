//! Bounded per-actor log of confirmed-safe standing positions.

use std::collections::VecDeque;

use crate::config::DeathConfig;
use crate::state::{BlockPos, DimensionId, GlobalPos};

/// Most-recent-first history without consecutive duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SafePositionHistory {
    entries: VecDeque<GlobalPos>,
    capacity: usize,
}

impl SafePositionHistory {
    pub fn new() -> Self {
        Self::with_capacity(DeathConfig::HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Pushes `pos` to the front unless it equals the current head.
    ///
    /// Returns whether the history changed.
    pub fn record(&mut self, pos: GlobalPos) -> bool {
        if self.entries.front() == Some(&pos) {
            return false;
        }
        self.entries.push_front(pos);
        self.entries.truncate(self.capacity);
        true
    }

    /// Same-dimension entry closest to `reference`. Ties go to the more
    /// recent entry.
    pub fn best_match(&self, dimension: DimensionId, reference: BlockPos) -> Option<BlockPos> {
        let mut best: Option<(i64, BlockPos)> = None;
        for entry in self.entries.iter().filter(|e| e.dimension == dimension) {
            let distance = entry.pos.distance_sq(reference);
            if best.is_none_or(|(best_distance, _)| distance < best_distance) {
                best = Some((distance, entry.pos));
            }
        }
        best.map(|(_, pos)| pos)
    }

    pub fn latest(&self) -> Option<GlobalPos> {
        self.entries.front().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GlobalPos> {
        self.entries.iter()
    }
}

impl Default for SafePositionHistory {
    fn default() -> Self {
        Self::new()
    }
}
