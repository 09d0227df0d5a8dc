use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use scraper::Html;
use url::Url;
use viewer_core::ImageHandle;
use viewer_logging::{viewer_debug, viewer_warn};

use crate::source::find_file;
use crate::ImagesFile;

fn src_attribute() -> &'static Regex {
    static SRC: OnceLock<Regex> = OnceLock::new();
    SRC.get_or_init(|| Regex::new(r#" src="(.*?)""#).expect("static regex"))
}

/// Rewrites `src` attributes of downloaded images to local handles. One
/// handle is issued per distinct source URL.
#[derive(Debug, Default)]
pub struct ImageSubstituter {
    downloaded: HashMap<String, String>,
    issued: HashMap<String, usize>,
    images: Vec<ImageHandle>,
}

impl ImageSubstituter {
    pub fn new(images: ImagesFile) -> Self {
        Self {
            downloaded: images.downloaded,
            ..Self::default()
        }
    }

    /// Returns `body` with every mapped image pointing at its local handle.
    /// `files` are the bundle's relative paths, `resolve` makes them absolute.
    pub fn rewrite(
        &mut self,
        body: &str,
        files: &[PathBuf],
        resolve: impl Fn(&Path) -> PathBuf,
    ) -> String {
        if self.downloaded.is_empty() {
            return body.to_string();
        }
        let raw_sources: Vec<String> = src_attribute()
            .captures_iter(body)
            .map(|caps| caps[1].to_string())
            .collect();

        let mut rewritten = body.to_string();
        for raw in raw_sources {
            let source = decode_entities(&raw);
            let Some(handle) = self.handle_for(&source, files, &resolve) else {
                continue;
            };
            rewritten = rewritten.replacen(&format!("src=\"{raw}\""), &format!("src=\"{handle}\""), 1);
        }
        rewritten
    }

    pub fn into_handles(self) -> Vec<ImageHandle> {
        self.images
    }

    fn handle_for(
        &mut self,
        source: &str,
        files: &[PathBuf],
        resolve: &impl Fn(&Path) -> PathBuf,
    ) -> Option<String> {
        if let Some(&index) = self.issued.get(source) {
            return Some(self.images[index].handle.clone());
        }
        let filename = self.downloaded.get(source)?;
        let Some(relative) = find_file(files, filename) else {
            viewer_warn!("Image {} maps to missing file {}", source, filename);
            return None;
        };
        let path = resolve(relative);
        let handle = Url::from_file_path(&path)
            .map(|url| url.to_string())
            .unwrap_or_else(|()| path.display().to_string());
        viewer_debug!("Image handle {} for {}", handle, source);

        self.issued.insert(source.to_string(), self.images.len());
        self.images.push(ImageHandle {
            source: source.to_string(),
            handle: handle.clone(),
            path,
        });
        Some(handle)
    }
}

/// Resolves HTML character references in an attribute value.
pub(crate) fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    Html::parse_fragment(raw).root_element().text().collect()
}
