use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use viewer_core::LoadId;
use viewer_logging::viewer_warn;

use crate::loader::{load_snapshot, ChannelLoadSink, LoadSink};
use crate::{DirectorySource, LoaderEvent};

enum LoaderCommand {
    Load { load_id: LoadId, dir: PathBuf },
}

/// Background snapshot loader. Requests run on a dedicated tokio runtime;
/// results come back tagged with the load id that asked for them.
pub struct LoaderHandle {
    cmd_tx: mpsc::Sender<LoaderCommand>,
    event_rx: mpsc::Receiver<LoaderEvent>,
}

impl LoaderHandle {
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn load(&self, load_id: LoadId, dir: impl Into<PathBuf>) {
        let _ = self.cmd_tx.send(LoaderCommand::Load {
            load_id,
            dir: dir.into(),
        });
    }

    pub fn try_recv(&self) -> Option<LoaderEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl Default for LoaderHandle {
    fn default() -> Self {
        Self::new()
    }
}

async fn handle_command(command: LoaderCommand, event_tx: mpsc::Sender<LoaderEvent>) {
    match command {
        LoaderCommand::Load { load_id, dir } => {
            let sink = ChannelLoadSink::new(event_tx);
            let result = match DirectorySource::open(&dir).await {
                Ok(source) => load_snapshot(&source, load_id, &sink).await,
                Err(err) => Err(err),
            };
            let event = match result {
                Ok(snapshot) => LoaderEvent::MessagesLoaded {
                    load_id,
                    messages: snapshot.messages,
                    images: snapshot.images,
                },
                Err(error) => {
                    viewer_warn!("Load {} of {:?} failed: {}", load_id, dir, error);
                    LoaderEvent::Failed { load_id, error }
                }
            };
            sink.emit(event);
        }
    }
}
