//! Tracks which rendered messages intersect the viewport.

use std::collections::BTreeSet;

use crate::MessageId;

/// A single enter/leave notification from the visibility observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityTransition {
    pub id: MessageId,
    pub intersecting: bool,
}

impl VisibilityTransition {
    pub fn entered(id: MessageId) -> Self {
        Self {
            id,
            intersecting: true,
        }
    }

    pub fn left(id: MessageId) -> Self {
        Self {
            id,
            intersecting: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewportTracker {
    observed: Option<BTreeSet<MessageId>>,
    members: BTreeSet<MessageId>,
}

impl ViewportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts observing `ids`, replacing any previous subscription.
    pub fn subscribe(&mut self, ids: impl IntoIterator<Item = MessageId>) {
        self.disconnect();
        self.observed = Some(ids.into_iter().collect());
    }

    pub fn disconnect(&mut self) {
        self.observed = None;
        self.members.clear();
    }

    pub fn is_subscribed(&self) -> bool {
        self.observed.is_some()
    }

    pub fn observed_count(&self) -> usize {
        self.observed.as_ref().map_or(0, BTreeSet::len)
    }

    pub fn members(&self) -> &BTreeSet<MessageId> {
        &self.members
    }

    pub fn min_visible(&self) -> Option<MessageId> {
        self.members.first().copied()
    }

    /// Applies one transition and returns the new minimum member. Returns
    /// `None` without touching membership for ids outside the subscription.
    pub fn apply(&mut self, transition: VisibilityTransition) -> Option<MessageId> {
        let observed = self.observed.as_ref()?;
        if !observed.contains(&transition.id) {
            return None;
        }
        if transition.intersecting {
            self.members.insert(transition.id);
        } else {
            self.members.remove(&transition.id);
        }
        self.min_visible()
    }
}
