//! Snapshot viewer engine: bundle loading and message body conversion.
mod convert;
mod decode;
mod engine;
mod images;
mod loader;
mod source;
mod types;

pub use convert::{Converter, Html2TextConverter};
pub use decode::{decode_text, DecodeError};
pub use engine::LoaderHandle;
pub use images::ImageSubstituter;
pub use loader::{load_snapshot, ChannelLoadSink, LoadSink};
pub use source::{DirectorySource, SnapshotSource};
pub use types::{
    ImagesFile, LoadError, LoadedSnapshot, LoaderEvent, TopicFile, IMAGES_FILE, MESSAGES_FILE,
    TOPIC_FILE,
};
