use std::path::PathBuf;
use std::sync::Arc;

use crate::view_model::AppViewModel;
use crate::{ImageHandle, JumpStack, Message, MessageId, ReturnProbe, ViewportTracker, VisibilityTransition};

pub type LoadId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading {
        dir: PathBuf,
    },
    Ready,
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    title: String,
    directory_input: String,
    show_directory_input: bool,
    messages: Arc<Vec<Message>>,
    images: Vec<ImageHandle>,
    jump_stack: JumpStack,
    viewport: ViewportTracker,
    anchor: Option<MessageId>,
    load: LoadStatus,
    current_load: LoadId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            title: String::new(),
            directory_input: String::new(),
            show_directory_input: true,
            messages: Arc::new(Vec::new()),
            images: Vec::new(),
            jump_stack: JumpStack::new(),
            viewport: ViewportTracker::new(),
            anchor: None,
            load: LoadStatus::Idle,
            current_load: 0,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            title: self.title.clone(),
            directory_input: self.directory_input.clone(),
            show_directory_input: self.show_directory_input,
            change_input_enabled: !self.title.is_empty(),
            original_poster: self.messages.first().map(|m| m.user.user_id.clone()),
            messages: Arc::clone(&self.messages),
            jump_stack: self.jump_stack.entries().to_vec(),
            return_visible: !self.jump_stack.is_empty(),
            anchor: self.anchor,
            load: self.load.clone(),
            image_count: self.images.len(),
            visible_count: self.viewport.members().len(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn jump_stack(&self) -> &JumpStack {
        &self.jump_stack
    }

    pub fn viewport(&self) -> &ViewportTracker {
        &self.viewport
    }

    pub fn anchor(&self) -> Option<MessageId> {
        self.anchor
    }

    pub fn images(&self) -> &[ImageHandle] {
        &self.images
    }

    pub fn directory_input(&self) -> &str {
        &self.directory_input
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_directory_input(&mut self, text: String) {
        if self.directory_input != text {
            self.directory_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_directory_input(&mut self) -> bool {
        if self.title.is_empty() {
            return false;
        }
        self.show_directory_input = !self.show_directory_input;
        self.mark_dirty();
        true
    }

    /// Clears everything derived from the previous snapshot and issues a new
    /// load id. Events tagged with older ids are ignored from here on.
    pub(crate) fn begin_load(&mut self, dir: PathBuf) -> LoadId {
        self.title.clear();
        self.messages = Arc::new(Vec::new());
        self.images.clear();
        self.jump_stack.clear();
        self.viewport.disconnect();
        self.anchor = None;
        self.current_load += 1;
        self.load = LoadStatus::Loading { dir };
        self.mark_dirty();
        self.current_load
    }

    pub(crate) fn is_current_load(&self, load_id: LoadId) -> bool {
        load_id == self.current_load && matches!(self.load, LoadStatus::Loading { .. })
    }

    pub(crate) fn apply_title(&mut self, title: String) {
        self.title = title;
        self.show_directory_input = false;
        self.mark_dirty();
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    /// Installs a loaded list and returns the ids of the messages that render.
    pub(crate) fn install_messages(
        &mut self,
        messages: Vec<Message>,
        images: Vec<ImageHandle>,
    ) -> Vec<MessageId> {
        let rendered: Vec<MessageId> = messages
            .iter()
            .filter(|m| !m.is_suppressed())
            .map(|m| m.msg_num)
            .collect();
        self.messages = Arc::new(messages);
        self.images = images;
        self.viewport.subscribe(rendered.iter().copied());
        self.load = LoadStatus::Ready;
        self.mark_dirty();
        rendered
    }

    pub(crate) fn fail_load(&mut self, reason: String) {
        self.load = LoadStatus::Failed { reason };
        self.show_directory_input = true;
        self.mark_dirty();
    }

    pub(crate) fn record_jump(&mut self, from: MessageId, to: MessageId) {
        self.jump_stack.record_jump(from, to);
        self.anchor = Some(to);
        self.mark_dirty();
    }

    pub(crate) fn return_to_last_jump(&mut self, probe: ReturnProbe) -> Vec<MessageId> {
        let targets = self.jump_stack.return_to_last_jump(probe);
        if let Some(last) = targets.last() {
            self.anchor = Some(*last);
            self.mark_dirty();
        }
        targets
    }

    pub(crate) fn apply_visibility(&mut self, transition: VisibilityTransition) {
        let before = self.viewport.members().len();
        let min_visible = self.viewport.apply(transition);
        let pruned = self.jump_stack.prune(min_visible);
        if pruned > 0 || before != self.viewport.members().len() {
            self.mark_dirty();
        }
    }
}
