//! Bounded undo/redo history of whole-value snapshots.
//!
//! Callers push the state *before* a change. Undo swaps the current state with the most
//! recent snapshot and parks the current one on the redo stack, and redo does the
//! reverse. Both stacks drop their oldest entry once `max_depth` is reached.

use std::collections::VecDeque;

/// Default number of undo steps kept per diagram.
pub const DEFAULT_HISTORY_DEPTH: usize = 25;

#[derive(Debug, Clone, PartialEq)]
pub struct History<T> {
    undo_stack: VecDeque<T>,
    redo_stack: VecDeque<T>,
    max_depth: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl<T> History<T> {
    /// A depth of zero is treated as one.
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_depth: max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Record the state before a change. Clears the redo stack.
    pub fn push(&mut self, snapshot: T) {
        push_bounded(&mut self.undo_stack, snapshot, self.max_depth);
        self.redo_stack.clear();
    }

    /// Step back: returns the previous state and keeps `current` for redo.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.undo_stack.pop_back()?;
        push_bounded(&mut self.redo_stack, current, self.max_depth);
        Some(previous)
    }

    /// Step forward again: returns the undone state and keeps `current` for undo.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo_stack.pop_back()?;
        push_bounded(&mut self.undo_stack, current, self.max_depth);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

fn push_bounded<T>(stack: &mut VecDeque<T>, item: T, max_depth: usize) {
    if stack.len() >= max_depth {
        stack.pop_front();
    }
    stack.push_back(item);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_empty_returns_none() {
        let mut history: History<u32> = History::default();
        assert_eq!(history.undo(1), None);
        assert_eq!(history.redo(1), None);
        assert!(!history.can_undo());
        assert_eq!(history.max_depth(), 25);
    }

    #[test]
    fn test_undo_then_redo_round_trip() {
        let mut history = History::new(10);
        let mut state = 0;
        for next in 1..=3 {
            history.push(state);
            state = next;
        }
        state = history.undo(state).unwrap();
        assert_eq!(state, 2);
        state = history.undo(state).unwrap();
        assert_eq!(state, 1);
        assert!(history.can_redo());
        state = history.redo(state).unwrap();
        assert_eq!(state, 2);
        assert_eq!(history.undo_len(), 2);
        assert_eq!(history.redo_len(), 1);
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = History::new(10);
        history.push(0);
        let state = history.undo(1).unwrap();
        assert!(history.can_redo());
        history.push(state);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_depth_is_bounded() {
        let mut history = History::new(3);
        for i in 0..10 {
            history.push(i);
        }
        assert_eq!(history.undo_len(), 3);
        let mut state = 10;
        let mut seen = Vec::new();
        while let Some(previous) = history.undo(state) {
            seen.push(previous);
            state = previous;
        }
        assert_eq!(seen, vec![9, 8, 7]);
        assert_eq!(history.redo_len(), 3);
    }

    #[test]
    fn test_zero_depth_keeps_one() {
        let mut history = History::new(0);
        history.push('a');
        history.push('b');
        assert_eq!(history.undo('c'), Some('b'));
        assert_eq!(history.undo('b'), None);
    }

    #[test]
    fn test_clear_empties_both_stacks() {
        let mut history = History::new(5);
        history.push(1);
        history.undo(2);
        history.push(3);
        history.clear();
        assert!(!history.can_undo() && !history.can_redo());
    }
}
