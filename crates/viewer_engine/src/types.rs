use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use viewer_core::{ImageHandle, LoadId, Message};

use crate::DecodeError;

pub const TOPIC_FILE: &str = "topic.json";
pub const MESSAGES_FILE: &str = "messages.json";
pub const IMAGES_FILE: &str = "images.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TopicFile {
    pub title: String,
}

/// `images.json`: original image URL to downloaded file name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ImagesFile {
    #[serde(default)]
    pub downloaded: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSnapshot {
    pub title: String,
    pub messages: Vec<Message>,
    pub images: Vec<ImageHandle>,
}

#[derive(Debug)]
pub enum LoaderEvent {
    TitleLoaded {
        load_id: LoadId,
        title: String,
    },
    MessagesLoaded {
        load_id: LoadId,
        messages: Vec<Message>,
        images: Vec<ImageHandle>,
    },
    Failed {
        load_id: LoadId,
        error: LoadError,
    },
}

impl LoaderEvent {
    pub fn load_id(&self) -> LoadId {
        match self {
            LoaderEvent::TitleLoaded { load_id, .. }
            | LoaderEvent::MessagesLoaded { load_id, .. }
            | LoaderEvent::Failed { load_id, .. } => *load_id,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no files found in {}", .0.display())]
    EmptyDirectory(PathBuf),
    #[error("{0} not found in snapshot")]
    MissingFile(&'static str),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{file} is not valid JSON: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}
