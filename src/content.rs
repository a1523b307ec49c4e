//! The text that goes on a graphic, validated once at construction.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ContentError;

/// Longest accepted post body, in characters.
pub const MAX_POST_TEXT_CHARS: usize = 280;
/// Longest accepted display name, in characters.
pub const MAX_DISPLAY_NAME_CHARS: usize = 50;

fn non_empty(field: &'static str, value: &str) -> Result<(), ContentError> {
    if value.trim().is_empty() {
        return Err(ContentError::new(field, "must not be empty"));
    }
    Ok(())
}

fn at_most(field: &'static str, value: &str, max: usize) -> Result<(), ContentError> {
    let count = value.chars().count();
    if count > max {
        return Err(ContentError::new(
            field,
            format!("has {count} characters, at most {max} are allowed"),
        ));
    }
    Ok(())
}

/// Output files are named after this value, so it must stay a single path
/// component.
fn file_stem(field: &'static str, value: &str) -> Result<(), ContentError> {
    non_empty(field, value)?;
    if value.contains(['/', '\\', '\0']) || value == "." || value == ".." {
        return Err(ContentError::new(field, "must be usable as a file name"));
    }
    Ok(())
}

/// A quote or lyric: the title names the output file, the text is drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteContent {
    title: String,
    text: String,
}

impl QuoteContent {
    /// Checks that `title` is a usable file name and `text` is not blank.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Result<Self, ContentError> {
        let title = title.into();
        let text = text.into();
        file_stem("title", &title)?;
        non_empty("text", &text)?;
        Ok(Self { title, text })
    }

    /// Title, also the output file stem.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Text to lay out.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Serialized shape of a post inside a batch file.
#[derive(Clone, Debug, Deserialize)]
pub struct RawPostContent {
    pub tweet_name: String,
    pub user_name: String,
    pub user_tag: String,
    #[serde(default)]
    pub user_pic: Option<String>,
    pub tweet_text: String,
}

/// A social-media post: header metadata plus body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostContent {
    name: String,
    display_name: String,
    handle: String,
    avatar: Option<PathBuf>,
    text: String,
}

impl PostContent {
    /// Validates the post and normalizes the handle to start with `@`.
    ///
    /// An empty avatar path is the same as no avatar.
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        handle: impl Into<String>,
        avatar: Option<PathBuf>,
        text: impl Into<String>,
    ) -> Result<Self, ContentError> {
        let name = name.into();
        let display_name = display_name.into();
        let handle = handle.into();
        let text = text.into();

        file_stem("post name", &name)?;
        non_empty("display name", &display_name)?;
        at_most("display name", &display_name, MAX_DISPLAY_NAME_CHARS)?;
        non_empty("text", &text)?;
        at_most("text", &text, MAX_POST_TEXT_CHARS)?;

        let handle = handle.trim();
        if handle.trim_start_matches('@').is_empty() {
            return Err(ContentError::new("handle", "must not be empty"));
        }
        let handle = if handle.starts_with('@') {
            handle.to_string()
        } else {
            format!("@{handle}")
        };

        let avatar = avatar.filter(|path| !path.as_os_str().is_empty());

        Ok(Self {
            name,
            display_name,
            handle,
            avatar,
            text,
        })
    }

    /// Output file stem.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Author name shown in the header.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Always starts with `@`.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Profile picture file, if any.
    pub fn avatar(&self) -> Option<&Path> {
        self.avatar.as_deref()
    }

    /// Post body.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl TryFrom<RawPostContent> for PostContent {
    type Error = ContentError;

    fn try_from(raw: RawPostContent) -> Result<Self, Self::Error> {
        Self::new(
            raw.tweet_name,
            raw.user_name,
            raw.user_tag,
            raw.user_pic.map(PathBuf::from),
            raw.tweet_text,
        )
    }
}

/// Field reference for post batch files.
pub const POST_CONTENT_HELP: &str = r#"Posts are a JSON array of objects with these fields:
    "tweet_name": name of the output file (without extension);
    "user_name": display name of the author, at most 50 characters;
    "user_tag": handle of the author, a leading "@" is added when missing;
    "user_pic": optional path to the profile picture, "" for none;
    "tweet_text": body of the post, at most 280 characters."#;

/// Field reference for quote batch files.
pub const QUOTE_CONTENT_HELP: &str = r#"Quotes are a JSON object mapping each title to its text:
    {"<title>": "<text>", ...}
The title names the output file (without extension)."#;
