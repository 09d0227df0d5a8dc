use std::sync::Arc;

use crate::{LoadStatus, Message, MessageId};

pub const APP_NAME: &str = "Snapshot Viewer";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub title: String,
    pub directory_input: String,
    pub show_directory_input: bool,
    /// The title/input toggle only makes sense once a title exists.
    pub change_input_enabled: bool,
    pub messages: Arc<Vec<Message>>,
    /// Author of the first message.
    pub original_poster: Option<String>,
    pub jump_stack: Vec<MessageId>,
    pub return_visible: bool,
    pub anchor: Option<MessageId>,
    pub load: LoadStatus,
    pub image_count: usize,
    pub visible_count: usize,
    pub dirty: bool,
}

/// Window title for a snapshot title; empty titles show the app name alone.
pub fn window_title(title: &str) -> String {
    if title.is_empty() {
        APP_NAME.to_string()
    } else {
        format!("{title} | {APP_NAME}")
    }
}
