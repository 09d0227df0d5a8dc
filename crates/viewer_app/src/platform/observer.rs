//! Visibility observation for rendered message cards.
//!
//! Mirrors an intersection observer with a zero threshold: a card counts as
//! visible while any of its rows overlaps the viewport. The viewport's top
//! edge is pushed up by [`ROOT_MARGIN_TOP`] rows so the card just above a
//! navigated-to message still counts as visible.

use std::collections::HashMap;

use viewer_core::{MessageId, VisibilityTransition};

use super::ui::layout::{PageLayout, Viewport};

pub const ROOT_MARGIN_TOP: usize = 1;

#[derive(Debug, Default)]
pub struct IntersectionObserver {
    observed: Vec<MessageId>,
    last: HashMap<MessageId, bool>,
}

impl IntersectionObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the observed set. The next [`take_records`](Self::take_records)
    /// reports every observed card that is on the page.
    pub fn observe(&mut self, ids: impl IntoIterator<Item = MessageId>) {
        self.disconnect();
        self.observed = ids.into_iter().collect();
    }

    pub fn disconnect(&mut self) {
        self.observed.clear();
        self.last.clear();
    }

    pub fn is_observing(&self) -> bool {
        !self.observed.is_empty()
    }

    /// Transitions since the previous call, in ascending id order. Cards the
    /// layout does not contain are skipped.
    pub fn take_records(
        &mut self,
        layout: &PageLayout,
        viewport: &Viewport,
    ) -> Vec<VisibilityTransition> {
        let root_top = viewport.scroll.saturating_sub(ROOT_MARGIN_TOP);
        let root_bottom = viewport.scroll + viewport.height;

        let mut records = Vec::new();
        for &id in &self.observed {
            let Some(card) = layout.card(id) else {
                continue;
            };
            let intersecting = card.top < root_bottom && card.bottom() > root_top;
            if self.last.insert(id, intersecting) != Some(intersecting) {
                records.push(VisibilityTransition { id, intersecting });
            }
        }
        records
    }
}
