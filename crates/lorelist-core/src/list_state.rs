//! Ordered list of text entries plus the edits that may be applied to it.

use std::fmt;

/// The ordered sequence of text entries shown by the list view.
///
/// `revision` advances on every mutation and `generation` advances on every
/// wholesale replacement, so observers can tell an append or a positional
/// edit apart from a reset or a load without diffing the contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListState {
    items: Vec<String>,
    revision: u64,
    generation: u64,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<String>) -> Self {
        Self {
            items,
            revision: 0,
            generation: 0,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Appends entries at the end, keeping the list identity.
    pub fn append(&mut self, items: impl IntoIterator<Item = String>) {
        let before = self.items.len();
        self.items.extend(items);
        if self.items.len() != before {
            self.revision += 1;
        }
    }

    /// Replaces the whole list. Always starts a new generation, even when the
    /// new contents happen to equal the old ones.
    pub fn replace(&mut self, items: Vec<String>) {
        self.items = items;
        self.revision += 1;
        self.generation += 1;
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    /// Builds a removal edit against the current revision.
    pub fn remove_edit(&self, index: usize) -> ListEdit {
        ListEdit::Remove {
            index,
            revision: self.revision,
        }
    }

    /// Builds a move edit against the current revision.
    pub fn move_edit(&self, from: usize, to: usize) -> ListEdit {
        ListEdit::Move {
            from,
            to,
            revision: self.revision,
        }
    }

    /// Applies an edit produced by the list view.
    ///
    /// Edits computed against an older revision are rejected rather than
    /// re-targeted: the index they carry may now name different content.
    pub fn apply(&mut self, edit: &ListEdit) -> Result<(), ListEditError> {
        if edit.revision() != self.revision {
            return Err(ListEditError::Stale {
                expected: self.revision,
                found: edit.revision(),
            });
        }

        let len = self.items.len();
        match *edit {
            ListEdit::Remove { index, .. } => {
                if index >= len {
                    return Err(ListEditError::OutOfBounds { index, len });
                }
                self.items.remove(index);
            }
            ListEdit::Move { from, to, .. } => {
                if from >= len {
                    return Err(ListEditError::OutOfBounds { index: from, len });
                }
                if to >= len {
                    return Err(ListEditError::OutOfBounds { index: to, len });
                }
                if from == to {
                    return Ok(());
                }
                let item = self.items.remove(from);
                self.items.insert(to, item);
            }
        }
        self.revision += 1;
        Ok(())
    }
}

/// Index-scoped mutation requested by the list view.
///
/// `Move` uses single-step splice semantics: remove at `from`, then insert at
/// `to` in the shortened list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListEdit {
    Remove { index: usize, revision: u64 },
    Move { from: usize, to: usize, revision: u64 },
}

impl ListEdit {
    pub fn revision(&self) -> u64 {
        match *self {
            ListEdit::Remove { revision, .. } | ListEdit::Move { revision, .. } => revision,
        }
    }

    /// First index whose content may differ after the edit is applied.
    pub fn first_affected_index(&self) -> usize {
        match *self {
            ListEdit::Remove { index, .. } => index,
            ListEdit::Move { from, to, .. } => from.min(to),
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(*self, ListEdit::Move { from, to, .. } if from == to)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListEditError {
    Stale { expected: u64, found: u64 },
    OutOfBounds { index: usize, len: usize },
}

impl fmt::Display for ListEditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListEditError::Stale { expected, found } => {
                write!(f, "edit computed at revision {found}, list is at {expected}")
            }
            ListEditError::OutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for list of length {len}")
            }
        }
    }
}

impl std::error::Error for ListEditError {}
