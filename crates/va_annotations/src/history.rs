use crate::annotation::Annotation;

/// Snapshot-based undo/redo stacks for an annotation collection.
///
/// Every entry is a full deep copy of the collection at a point in time;
/// restoring never aliases the live collection. Recording a new snapshot
/// clears the redo stack, so at most one of the two stacks is non-empty
/// right after a fresh mutation.
#[derive(Debug, Default)]
pub struct SnapshotHistory {
    undo_stack: Vec<Vec<Annotation>>,
    redo_stack: Vec<Vec<Annotation>>,
    max_depth: usize,
}

impl SnapshotHistory {
    /// Default maximum stack depth.
    pub const DEFAULT_MAX_DEPTH: usize = 100;

    pub fn new() -> Self {
        Self::with_depth(Self::DEFAULT_MAX_DEPTH)
    }

    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Record the pre-mutation state of the collection.
    ///
    /// Called exactly once per committed mutation (new annotation, erase).
    pub fn record(&mut self, snapshot: &[Annotation]) {
        self.redo_stack.clear();

        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(snapshot.to_vec());
    }

    /// Pop the most recent snapshot, stashing `current` for redo.
    ///
    /// Returns `None` (and changes nothing) when there is nothing to undo.
    pub fn undo(&mut self, current: &[Annotation]) -> Option<Vec<Annotation>> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(current.to_vec());
        Some(snapshot)
    }

    /// Symmetric inverse of [`Self::undo`].
    pub fn redo(&mut self, current: &[Annotation]) -> Option<Vec<Annotation>> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(current.to_vec());
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop both stacks (used when loading or switching collections).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
