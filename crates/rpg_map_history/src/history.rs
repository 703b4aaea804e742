//! Grouped, bounded undo/redo over tile deltas

use std::collections::VecDeque;
use tracing::{debug, trace, warn};

use crate::config::HistoryConfig;
use crate::delta::{HistoryEntry, ReplayDirection, TileDelta};
use crate::sync::SyncTarget;

/// Undo/redo history of tile edits.
///
/// Edits are grouped by `begin_entry` / `commit_entry`. Committing a new
/// entry discards everything that could be redone. The undo stack holds at
/// most `max_entries` entries; the oldest is dropped first.
#[derive(Debug)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct TileHistory {
    /// Committed entries, oldest at the front
    undo_stack: VecDeque<HistoryEntry>,
    /// Undone entries, most recently undone at the back
    redo_stack: Vec<HistoryEntry>,
    /// Entry currently collecting deltas
    open: Option<HistoryEntry>,
    config: HistoryConfig,
}

impl Default for TileHistory {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl TileHistory {
    /// Create an empty history. A `max_entries` of 0 is treated as 1.
    pub fn new(mut config: HistoryConfig) -> Self {
        config.max_entries = config.max_entries.max(1);
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            open: None,
            config,
        }
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Start a new entry. An entry that is still open is committed first.
    pub fn begin_entry(&mut self, label: impl Into<String>) {
        if self.open.is_some() {
            self.commit_entry();
        }
        let entry = HistoryEntry::new(label);
        trace!(id = %entry.id, label = %entry.label, "history entry opened");
        self.open = Some(entry);
    }

    /// Record a delta into the open entry, opening one if needed
    pub fn add_delta(&mut self, delta: TileDelta) {
        let label = &self.config.default_label;
        let entry = self.open.get_or_insert_with(|| {
            warn!(label = %label, "tile delta recorded with no open history entry, opening one");
            HistoryEntry::new(label.clone())
        });
        entry.push(delta);
    }

    /// Push the open entry onto the undo stack.
    ///
    /// Entries without deltas are dropped. A pushed entry clears the redo
    /// stack.
    pub fn commit_entry(&mut self) {
        let Some(entry) = self.open.take() else {
            return;
        };
        if entry.is_empty() {
            trace!(label = %entry.label, "discarding empty history entry");
            return;
        }

        debug!(
            id = %entry.id,
            label = %entry.label,
            deltas = entry.len(),
            "history entry committed"
        );
        self.undo_stack.push_back(entry);
        self.redo_stack.clear();
        self.evict_overflow();
    }

    /// Undo the most recent entry. Returns false if there was nothing to undo.
    ///
    /// Deltas are replayed newest first, writing their "before" snapshots.
    /// An entry that is still open stays open and is not part of the undo.
    pub fn undo(&mut self, target: &mut SyncTarget<'_>) -> bool {
        let Some(entry) = self.undo_stack.pop_back() else {
            return false;
        };

        debug!(id = %entry.id, label = %entry.label, "undo");
        replay(&entry, ReplayDirection::Undo, target);
        self.redo_stack.push(entry);
        true
    }

    /// Redo the most recently undone entry. Returns false if there was
    /// nothing to redo.
    ///
    /// Deltas are replayed in recorded order, writing their "after" snapshots.
    /// An entry that is still open stays open and the redo stack is kept.
    pub fn redo(&mut self, target: &mut SyncTarget<'_>) -> bool {
        let Some(entry) = self.redo_stack.pop() else {
            return false;
        };

        debug!(id = %entry.id, label = %entry.label, "redo");
        replay(&entry, ReplayDirection::Redo, target);
        self.undo_stack.push_back(entry);
        self.evict_overflow();
        true
    }

    /// Drop all history, including an open entry. Call on map switch.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open = None;
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Get label of the entry to undo
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.back().map(|e| e.label.as_str())
    }

    /// Get label of the entry to redo
    pub fn redo_label(&self) -> Option<&str> {
        self.redo_stack.last().map(|e| e.label.as_str())
    }

    /// Whether an entry is open and collecting deltas
    pub fn is_recording(&self) -> bool {
        self.open.is_some()
    }

    pub fn open_label(&self) -> Option<&str> {
        self.open.as_ref().map(|e| e.label.as_str())
    }

    /// Deltas recorded into the open entry so far
    pub fn pending_delta_count(&self) -> usize {
        self.open.as_ref().map_or(0, |e| e.len())
    }

    /// Committed entries, oldest first
    pub fn undo_entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.undo_stack.iter()
    }

    pub fn max_entries(&self) -> usize {
        self.config.max_entries
    }

    /// Change the undo depth, dropping the oldest entries if it shrank
    pub fn set_max_entries(&mut self, max_entries: usize) {
        self.config.max_entries = max_entries.max(1);
        self.evict_overflow();
    }

    fn evict_overflow(&mut self) {
        while self.undo_stack.len() > self.config.max_entries {
            if let Some(evicted) = self.undo_stack.pop_front() {
                debug!(id = %evicted.id, label = %evicted.label, "history entry evicted");
            }
        }
    }
}

/// Write every delta of an entry back into the target grid
fn replay(entry: &HistoryEntry, direction: ReplayDirection, target: &mut SyncTarget<'_>) {
    if !target.has_grid() {
        warn!(
            label = %entry.label,
            deltas = entry.len(),
            ?direction,
            "no tile grid attached, skipping replay"
        );
        return;
    }

    match direction {
        ReplayDirection::Undo => {
            for delta in entry.deltas.iter().rev() {
                target.write_stack(delta.layer, delta.x, delta.y, delta.stack_for(direction));
            }
        }
        ReplayDirection::Redo => {
            for delta in &entry.deltas {
                target.write_stack(delta.layer, delta.x, delta.y, delta.stack_for(direction));
            }
        }
    }
}
