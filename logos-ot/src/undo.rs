//! Per-client undo/redo history.
//!
//! Each entry is the inverse of a local edit, expressed against the document
//! as it is now. Remote edits are folded in with [`UndoStack::transform_remote`]
//! so undoing a local edit never reverts somebody else's.

use std::collections::VecDeque;

use crate::error::Result;
use crate::operation::Operation;

pub struct UndoStack {
    /// Top of stack at the back.
    undo: VecDeque<Operation>,
    redo: Vec<Operation>,
    max_depth: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(100)
    }
}

impl UndoStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(max_depth.min(256)),
            redo: Vec::new(),
            max_depth,
        }
    }

    /// Record a local edit. `text_before` is the document `op` was applied to.
    pub fn record(&mut self, op: &Operation, text_before: &str) -> Result<()> {
        let inverse = op.invert(text_before)?;
        self.undo.push_back(inverse);
        if self.undo.len() > self.max_depth {
            self.undo.pop_front();
            log::debug!("Undo history full, dropped oldest entry");
        }
        self.redo.clear();
        Ok(())
    }

    /// Pop the most recent edit. Returns the operation to apply to
    /// `current_text`, or `None` when there is nothing to undo.
    pub fn undo(&mut self, current_text: &str) -> Result<Option<Operation>> {
        let Some(inverse) = self.undo.pop_back() else {
            return Ok(None);
        };
        match inverse.invert(current_text) {
            Ok(redo) => {
                self.redo.push(redo);
                Ok(Some(inverse))
            }
            Err(e) => {
                self.undo.push_back(inverse);
                Err(e)
            }
        }
    }

    /// Re-apply the most recently undone edit.
    pub fn redo(&mut self, current_text: &str) -> Result<Option<Operation>> {
        let Some(op) = self.redo.pop() else {
            return Ok(None);
        };
        match op.invert(current_text) {
            Ok(undo) => {
                self.undo.push_back(undo);
                Ok(Some(op))
            }
            Err(e) => {
                self.redo.push(op);
                Err(e)
            }
        }
    }

    /// Rebase both stacks past `remote`, an operation just applied on top of
    /// the current document. Entries that become no-ops are dropped.
    pub fn transform_remote(&mut self, remote: &Operation) -> Result<()> {
        let undo = transform_stack(self.undo.iter().rev(), remote)?;
        let redo = transform_stack(self.redo.iter().rev(), remote)?;
        self.undo = undo.into_iter().rev().collect();
        self.redo = redo.into_iter().rev().collect();
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

/// Transform stack entries, newest first, against `remote`. Each entry is
/// based on the document its newer neighbour produces, so `remote` is
/// carried down the stack as it goes. Returns entries newest first.
fn transform_stack<'a>(
    newest_first: impl Iterator<Item = &'a Operation>,
    remote: &Operation,
) -> Result<Vec<Operation>> {
    let mut remote = remote.clone();
    let mut rebased = Vec::new();
    for entry in newest_first {
        let (entry_prime, remote_prime) = entry.transform(&remote)?;
        if !entry_prime.is_noop() {
            rebased.push(entry_prime);
        }
        remote = remote_prime;
    }
    Ok(rebased)
}
