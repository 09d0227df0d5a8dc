use std::path::Path;

use serde::de::DeserializeOwned;
use viewer_core::{LoadId, Message, MessageId};
use viewer_logging::{viewer_info, viewer_warn};

use crate::source::find_file;
use crate::{
    decode_text, ImageSubstituter, ImagesFile, LoadError, LoadedSnapshot, LoaderEvent,
    SnapshotSource, TopicFile, IMAGES_FILE, MESSAGES_FILE, TOPIC_FILE,
};

pub trait LoadSink: Send + Sync {
    fn emit(&self, event: LoaderEvent);
}

pub struct ChannelLoadSink {
    tx: std::sync::mpsc::Sender<LoaderEvent>,
}

impl ChannelLoadSink {
    pub fn new(tx: std::sync::mpsc::Sender<LoaderEvent>) -> Self {
        Self { tx }
    }
}

impl LoadSink for ChannelLoadSink {
    fn emit(&self, event: LoaderEvent) {
        let _ = self.tx.send(event);
    }
}

/// Reads a snapshot bundle. The title is reported through `sink` as soon as
/// `topic.json` is decoded; the rest is returned.
pub async fn load_snapshot(
    source: &dyn SnapshotSource,
    load_id: LoadId,
    sink: &dyn LoadSink,
) -> Result<LoadedSnapshot, LoadError> {
    let files = source.list().await?;
    if files.is_empty() {
        return Err(LoadError::EmptyDirectory(source.resolve(Path::new(""))));
    }

    let topic_path = find_file(&files, TOPIC_FILE).ok_or(LoadError::MissingFile(TOPIC_FILE))?;
    let topic: TopicFile = read_json(source, topic_path, TOPIC_FILE).await?;
    sink.emit(LoaderEvent::TitleLoaded {
        load_id,
        title: topic.title.clone(),
    });

    let images: ImagesFile = match find_file(&files, IMAGES_FILE) {
        Some(path) => read_json(source, path, IMAGES_FILE).await?,
        None => ImagesFile::default(),
    };

    let messages_path =
        find_file(&files, MESSAGES_FILE).ok_or(LoadError::MissingFile(MESSAGES_FILE))?;
    let mut messages: Vec<Message> = read_json(source, messages_path, MESSAGES_FILE).await?;

    let mut substituter = ImageSubstituter::new(images);
    for (index, message) in messages.iter_mut().enumerate() {
        let position = MessageId(index as u64 + 1);
        if message.msg_num != position {
            viewer_warn!(
                "Message at position {} has msg_num {}",
                position,
                message.msg_num
            );
        }
        message.msg = substituter.rewrite(&message.msg, &files, |relative| source.resolve(relative));
    }
    let images = substituter.into_handles();

    viewer_info!(
        "Loaded snapshot load_id={} messages={} images={}",
        load_id,
        messages.len(),
        images.len()
    );
    Ok(LoadedSnapshot {
        title: topic.title,
        messages,
        images,
    })
}

async fn read_json<T: DeserializeOwned>(
    source: &dyn SnapshotSource,
    path: &Path,
    file: &str,
) -> Result<T, LoadError> {
    let bytes = source.read(path).await?;
    let text = decode_text(file, &bytes)?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        file: file.to_string(),
        source,
    })
}
