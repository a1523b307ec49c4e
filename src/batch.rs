//! Rendering many quotes or posts from one JSON file.
//!
//! Each item renders on its own. A failing item is logged and reported and
//! the rest of the batch still runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::content::{PostContent, QuoteContent, RawPostContent};
use crate::error::{BatchError, ContentError, RenderError};
use crate::font_system::FontSystem;
use crate::settings::{PostSettings, QuoteSettings};

/// Outcome of one item of a batch.
#[derive(Debug)]
pub struct BatchItem {
    /// Title or post name, as written in the batch file.
    pub name: String,
    pub result: Result<PathBuf, RenderError>,
}

/// Per-item outcomes, in batch order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    /// Paths written by the successful items.
    pub fn rendered(&self) -> impl Iterator<Item = &Path> {
        self.items
            .iter()
            .filter_map(|item| item.result.as_ref().ok().map(PathBuf::as_path))
    }

    /// Name and error of every failed item.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &RenderError)> {
        self.items
            .iter()
            .filter_map(|item| item.result.as_ref().err().map(|err| (item.name.as_str(), err)))
    }

    /// Number of failed items.
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// `true` when no item failed.
    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }

    fn push(&mut self, name: String, result: Result<PathBuf, RenderError>) {
        if let Err(err) = &result {
            log::error!("skipping `{name}`: {err}");
        }
        self.items.push(BatchItem { name, result });
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, BatchError> {
    let contents = std::fs::read_to_string(path).map_err(|source| BatchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| BatchError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a quotes file: a JSON object mapping each title to its text.
///
/// Entries come back sorted by title.
pub fn read_quotes(path: &Path) -> Result<Vec<(String, String)>, BatchError> {
    let quotes: BTreeMap<String, String> = read_json(path)?;
    log::debug!("read {} quotes from {}", quotes.len(), path.display());
    Ok(quotes.into_iter().collect())
}

/// Reads a posts file: a JSON array of post objects.
///
/// Items are left as raw JSON so that one malformed post fails on its own in
/// [`render_posts`].
pub fn read_posts(path: &Path) -> Result<Vec<serde_json::Value>, BatchError> {
    let posts: Vec<serde_json::Value> = read_json(path)?;
    log::debug!("read {} posts from {}", posts.len(), path.display());
    Ok(posts)
}

/// Renders every `(title, text)` pair with the same settings.
pub fn render_quotes(
    system: &FontSystem,
    quotes: impl IntoIterator<Item = (String, String)>,
    settings: &QuoteSettings,
    out_dir: Option<&Path>,
) -> BatchReport {
    let mut report = BatchReport::default();
    for (title, text) in quotes {
        let result = QuoteContent::new(title.clone(), text)
            .map_err(RenderError::from)
            .and_then(|content| system.render_quote(&content, settings, out_dir));
        report.push(title, result);
    }
    log::info!(
        "rendered {} of {} quotes",
        report.items.len() - report.failure_count(),
        report.items.len()
    );
    report
}

/// Renders every post object with the same settings.
///
/// An item that is not a valid post object is reported under its
/// `tweet_name`, or `post #<n>` when it has none.
pub fn render_posts(
    system: &FontSystem,
    posts: impl IntoIterator<Item = serde_json::Value>,
    settings: &PostSettings,
    out_dir: Option<&Path>,
) -> BatchReport {
    let mut report = BatchReport::default();
    for (index, value) in posts.into_iter().enumerate() {
        let name = match value.get("tweet_name").and_then(serde_json::Value::as_str) {
            Some(name) => name.to_string(),
            None => format!("post #{}", index + 1),
        };
        let result = serde_json::from_value::<RawPostContent>(value)
            .map_err(|err| ContentError::new("post", err.to_string()))
            .and_then(PostContent::try_from)
            .map_err(RenderError::from)
            .and_then(|content| system.render_post(&content, settings, out_dir));
        report.push(name, result);
    }
    log::info!(
        "rendered {} of {} posts",
        report.items.len() - report.failure_count(),
        report.items.len()
    );
    report
}
