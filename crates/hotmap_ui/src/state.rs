//! Generic editing state: linear history and pan drags.

use crate::constants::HISTORY_LIMIT;
use crate::Point;

/// Linear undo/redo history over immutable snapshots.
///
/// The history is a sequence of values plus a cursor pointing at the current
/// one. Pushing truncates everything after the cursor, so once a new value
/// is pushed after an undo the undone values are gone for good.
///
/// The sequence is never empty, so [`EditHistory::current`] is always
/// defined.
///
/// # Example
/// ```
/// use hotmap_ui::EditHistory;
///
/// let mut history = EditHistory::new(vec![1]);
/// history.push_with(|current| {
///     let mut next = current.clone();
///     next.push(2);
///     next
/// });
/// assert_eq!(history.current(), &vec![1, 2]);
///
/// history.undo();
/// assert_eq!(history.current(), &vec![1]);
/// ```
#[derive(Debug, Clone)]
pub struct EditHistory<T: Clone> {
    /// Snapshots, oldest first
    sequence: Vec<T>,
    /// Index of the current snapshot
    cursor: usize,
    /// Maximum number of snapshots retained
    max_history: usize,
}

impl<T: Clone + Default> Default for EditHistory<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone> EditHistory<T> {
    /// Create a history holding a single snapshot.
    pub fn new(initial: T) -> Self {
        Self::with_limit(initial, HISTORY_LIMIT)
    }

    /// Create a history that keeps at most `max_history` snapshots.
    ///
    /// A limit of zero is treated as one.
    pub fn with_limit(initial: T, max_history: usize) -> Self {
        Self {
            sequence: vec![initial],
            cursor: 0,
            max_history: max_history.max(1),
        }
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &T {
        &self.sequence[self.cursor]
    }

    /// Push a new snapshot, discarding any redo states.
    pub fn push(&mut self, value: T) {
        self.sequence.truncate(self.cursor + 1);
        self.sequence.push(value);
        self.cursor = self.sequence.len() - 1;

        // Drop the oldest snapshots once over the limit
        if self.sequence.len() > self.max_history {
            let excess = self.sequence.len() - self.max_history;
            self.sequence.drain(..excess);
            self.cursor -= excess;
        }
        log::trace!(
            "History: pushed snapshot {} of {}",
            self.cursor + 1,
            self.sequence.len()
        );
    }

    /// Push the value computed from the current snapshot.
    pub fn push_with<F>(&mut self, updater: F)
    where
        F: FnOnce(&T) -> T,
    {
        let next = updater(self.current());
        self.push(next);
    }

    /// Step back one snapshot. Returns false if already at the oldest.
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one snapshot. Returns false if already at the newest.
    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 >= self.sequence.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Replace the whole history with a single snapshot.
    pub fn reset(&mut self, value: T) {
        self.sequence.clear();
        self.sequence.push(value);
        self.cursor = 0;
        log::debug!("History reset");
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.sequence.len()
    }

    /// Number of undo steps available
    pub fn undo_count(&self) -> usize {
        self.cursor
    }

    /// Number of redo steps available
    pub fn redo_count(&self) -> usize {
        self.sequence.len() - self.cursor - 1
    }

    /// Total number of snapshots retained.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Pan drag interaction state for a canvas
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanDragState {
    /// Not dragging
    #[default]
    Idle,
    /// Dragging with last pointer position (screen space)
    Dragging { last_pos: Point },
}

impl PanDragState {
    /// Check if currently dragging
    pub fn is_dragging(&self) -> bool {
        matches!(self, PanDragState::Dragging { .. })
    }

    /// Get the last drag position if dragging
    pub fn last_pos(&self) -> Option<Point> {
        match self {
            PanDragState::Dragging { last_pos } => Some(*last_pos),
            PanDragState::Idle => None,
        }
    }

    /// Start dragging with the given position
    pub fn start_drag(&mut self, pos: Point) {
        *self = PanDragState::Dragging { last_pos: pos };
    }

    /// Move to a new position, returning the raw screen delta since the last one.
    pub fn update_drag(&mut self, pos: Point) -> Option<(f32, f32)> {
        match self {
            PanDragState::Dragging { last_pos } => {
                let delta = last_pos.delta_to(pos);
                *last_pos = pos;
                Some(delta)
            }
            PanDragState::Idle => None,
        }
    }

    /// Stop dragging
    pub fn stop_drag(&mut self) {
        *self = PanDragState::Idle;
    }
}
