//! Input guards, batch splitting and keyboard chords.

use thiserror::Error;

/// Placeholder set on the single-text input when it gains focus while empty.
pub const SINGLE_PLACEHOLDER: &str = "Try: \"I love this product! 😍 It's amazing!\"";

/// Placeholder set on the batch input when it gains focus while empty.
pub const BATCH_PLACEHOLDER: &str = "Enter multiple texts, one per line...\nExample:\nI love this!\nThis is terrible!\nThe weather is nice.";

/// Input rejected before any request is issued. `Display` is the user notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter some text to analyze.")]
    EmptyText,
    #[error("Please enter some texts to analyze (one per line).")]
    EmptyBatch,
    #[error("Please limit to {limit} texts or fewer for batch analysis.")]
    BatchTooLarge { limit: usize, count: usize },
}

/// Trimmed single-mode text, or [`InputError::EmptyText`] when only whitespace remains.
pub fn validate_single(raw: &str) -> Result<String, InputError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(InputError::EmptyText);
    }
    Ok(text.to_string())
}

/// Split on `\n` and drop lines that are blank once trimmed. Kept lines are not trimmed.
pub fn split_batch(raw: &str) -> Vec<String> {
    raw.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

pub fn validate_batch(raw: &str, limit: usize) -> Result<Vec<String>, InputError> {
    let texts = split_batch(raw);
    if texts.is_empty() {
        return Err(InputError::EmptyBatch);
    }
    if texts.len() > limit {
        return Err(InputError::BatchTooLarge {
            limit,
            count: texts.len(),
        });
    }
    Ok(texts)
}

/// Host platform, which decides the primary control modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    /// Command (Meta) is the primary modifier.
    MacOs,
    /// Control is the primary modifier.
    Other,
}

impl Platform {
    /// Platform of the running binary.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Other
        }
    }

    /// Guess the platform from a browser `navigator.platform` string.
    pub fn from_navigator(platform: &str) -> Self {
        let lowered = platform.to_ascii_lowercase();
        if lowered.starts_with("mac") || lowered.contains("iphone") || lowered.contains("ipad") {
            Self::MacOs
        } else {
            Self::Other
        }
    }
}

/// A keydown as seen by an input element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyChord {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyChord {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: false,
            meta: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// True for primary-modifier + Enter.
    pub fn is_submit(&self, platform: Platform) -> bool {
        let modifier = match platform {
            Platform::MacOs => self.meta,
            Platform::Other => self.ctrl,
        };
        modifier && self.key == "Enter"
    }
}
