use std::path::PathBuf;

use crate::{LoadId, MessageId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read the snapshot bundle under `dir` in the background.
    LoadSnapshot { load_id: LoadId, dir: PathBuf },
    /// Stop observing rendered messages; issued before any new list is installed.
    DisconnectObserver,
    /// Observe the rendered messages of a freshly installed list.
    ObserveMessages { ids: Vec<MessageId> },
    /// Blank the anchor. Paired with `NavigateTo` to force re-navigation.
    ClearAnchor,
    /// Set the anchor and bring the message to the top of the viewport.
    NavigateTo { anchor: MessageId },
    SetWindowTitle { title: String },
}
