use std::io;

use crossterm::execute;
use crossterm::terminal::SetTitle;
use viewer_core::{Effect, MessageId, Msg};
use viewer_engine::{LoaderEvent, LoaderHandle};
use viewer_logging::{viewer_info, viewer_warn};

/// Effects that act on the page itself and are applied by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEffect {
    Disconnect,
    Observe(Vec<MessageId>),
    ClearAnchor,
    NavigateTo(MessageId),
}

pub struct EffectRunner {
    loader: LoaderHandle,
    /// Whether terminal commands such as the window title are written.
    terminal: bool,
}

impl EffectRunner {
    pub fn new() -> Self {
        Self {
            loader: LoaderHandle::new(),
            terminal: true,
        }
    }

    /// A runner that never writes to the terminal.
    #[cfg(test)]
    pub fn headless() -> Self {
        Self {
            loader: LoaderHandle::new(),
            terminal: false,
        }
    }

    /// Starts background work and hands back the page effects, in order.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Vec<PageEffect> {
        let mut page = Vec::new();
        for effect in effects {
            match effect {
                Effect::LoadSnapshot { load_id, dir } => {
                    viewer_info!("LoadSnapshot load_id={} dir={:?}", load_id, dir);
                    self.loader.load(load_id, dir);
                }
                Effect::SetWindowTitle { title } if self.terminal => {
                    if let Err(err) = execute!(io::stdout(), SetTitle(&title)) {
                        viewer_warn!("Failed to set window title: {}", err);
                    }
                }
                Effect::SetWindowTitle { .. } => {}
                Effect::DisconnectObserver => page.push(PageEffect::Disconnect),
                Effect::ObserveMessages { ids } => page.push(PageEffect::Observe(ids)),
                Effect::ClearAnchor => page.push(PageEffect::ClearAnchor),
                Effect::NavigateTo { anchor } => page.push(PageEffect::NavigateTo(anchor)),
            }
        }
        page
    }

    /// Loader results that arrived since the last call.
    pub fn poll(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.loader.try_recv() {
            inbox.push(map_event(event));
        }
        inbox
    }
}

impl Default for EffectRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn map_event(event: LoaderEvent) -> Msg {
    match event {
        LoaderEvent::TitleLoaded { load_id, title } => Msg::TitleLoaded { load_id, title },
        LoaderEvent::MessagesLoaded {
            load_id,
            messages,
            images,
        } => Msg::MessagesLoaded {
            load_id,
            messages,
            images,
        },
        LoaderEvent::Failed { load_id, error } => Msg::LoadFailed {
            load_id,
            reason: error.to_string(),
        },
    }
}
