use crate::{ImageHandle, LoadId, Message, MessageId, ReturnProbe, VisibilityTransition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the directory input.
    DirectoryInputChanged(String),
    /// User confirmed the directory input; starts a fresh load.
    DirectorySubmitted,
    /// User toggled between the title and the directory input.
    ToggleDirectoryInput,
    /// Loader read `topic.json`.
    TitleLoaded { load_id: LoadId, title: String },
    /// Loader finished decoding messages and substituting images.
    MessagesLoaded {
        load_id: LoadId,
        messages: Vec<Message>,
        images: Vec<ImageHandle>,
    },
    /// Loader gave up.
    LoadFailed { load_id: LoadId, reason: String },
    /// User followed the quote in message `from` to message `to`.
    QuoteClicked { from: MessageId, to: MessageId },
    /// User clicked the return control.
    ReturnClicked(ReturnProbe),
    /// Visibility observer delivered a batch of transitions, in order.
    VisibilityChanged(Vec<VisibilityTransition>),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
