//! Jump-back history for quote navigation.
//!
//! Following a quote from message `from` to message `to` records both ids so
//! the reader can come back. Entries are kept in ascending order as pushed;
//! pruning may remove entries from anywhere in the stack.

use crate::MessageId;

/// Layout measurements taken at the moment the reader asks to go back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReturnProbe {
    /// The current anchor, if its top edge sits exactly on the viewport top.
    pub top_aligned: Option<MessageId>,
    /// Page scrolled to its maximum extent (1-row tolerance).
    pub at_bottom: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JumpStack {
    entries: Vec<MessageId>,
}

impl JumpStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<MessageId>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MessageId] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self) -> Option<MessageId> {
        self.entries.last().copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Records a jump from the quoting message to the quoted one. Entries at
    /// or below `from` are superseded.
    pub fn record_jump(&mut self, from: MessageId, to: MessageId) {
        self.entries.retain(|id| *id > from);
        self.entries.push(from);
        self.entries.push(to);
    }

    /// Number of entries a return action consumes for the given probe.
    pub fn pop_count(&self, probe: ReturnProbe) -> usize {
        let skip_level = self.entries.len() >= 2
            && ((probe.top_aligned.is_some() && probe.top_aligned == self.top())
                || probe.at_bottom);
        if skip_level {
            2
        } else {
            self.entries.len().min(1)
        }
    }

    /// Pops one or two entries and returns them in pop order. The caller
    /// navigates to each in turn; the last one is where the reader lands.
    pub fn return_to_last_jump(&mut self, probe: ReturnProbe) -> Vec<MessageId> {
        let count = self.pop_count(probe);
        let split = self.entries.len() - count;
        let mut popped = self.entries.split_off(split);
        popped.reverse();
        popped
    }

    /// Drops every entry at or above the reader's current position, i.e.
    /// keeps only ids strictly greater than `min_visible`. `None` means the
    /// viewport reported no members and nothing is pruned.
    pub fn prune(&mut self, min_visible: Option<MessageId>) -> usize {
        let Some(min_visible) = min_visible else {
            return 0;
        };
        let before = self.entries.len();
        self.entries.retain(|id| *id > min_visible);
        before - self.entries.len()
    }
}
