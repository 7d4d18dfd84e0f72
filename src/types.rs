// Core types and error enum for pdf-wordviz
use serde::{Deserialize, Serialize};

/// One row of the frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub word: String,
    pub count: usize,
    /// 1-based position after sorting by descending count
    pub rank: usize,
}

impl RankedEntry {
    pub fn new(word: impl Into<String>, count: usize, rank: usize) -> Self {
        Self { word: word.into(), count, rank }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_words: usize,
    pub unique_words: usize,
    pub page_count: usize,
    pub readable_pages: usize,
}

/// Leading slice of the extracted text shown in the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPreview {
    pub text: String,
    pub truncated: bool,
}

impl TextPreview {
    /// Cut `text` after `max_chars` characters (not bytes).
    pub fn from_text(text: &str, max_chars: usize) -> Self {
        match text.char_indices().nth(max_chars) {
            Some((cut, _)) => Self { text: text[..cut].to_string(), truncated: true },
            None => Self { text: text.to_string(), truncated: false },
        }
    }

    /// Preview with the `...` marker appended when truncated.
    pub fn display(&self) -> String {
        if self.truncated {
            format!("{}...", self.text)
        } else {
            self.text.clone()
        }
    }
}

// Error types
#[derive(Debug, thiserror::Error)]
pub enum VizError {
    #[error("Not a readable PDF: {0}")]
    InvalidPdf(String),

    #[error("PDF is encrypted and cannot be opened")]
    Encrypted,

    #[error("No readable text found in this PDF.")]
    NoReadableText,

    #[error("The PDF contains text but no words could be extracted.")]
    NoWords,

    #[error("Render error: {0}")]
    Render(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VizError {
    /// Errors caused by the uploaded document rather than by this program.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            VizError::InvalidPdf(_) | VizError::Encrypted | VizError::NoReadableText | VizError::NoWords
        )
    }
}

pub type Result<T> = std::result::Result<T, VizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_untouched() {
        let preview = TextPreview::from_text("short text", 1500);
        assert!(!preview.truncated);
        assert_eq!(preview.display(), "short text");
    }

    #[test]
    fn test_preview_counts_chars_not_bytes() {
        let text = "é".repeat(10);
        let preview = TextPreview::from_text(&text, 4);
        assert!(preview.truncated);
        assert_eq!(preview.text, "éééé");
        assert_eq!(preview.display(), "éééé...");
    }

    #[test]
    fn test_preview_exact_length_not_truncated() {
        let preview = TextPreview::from_text("abcd", 4);
        assert!(!preview.truncated);
        assert_eq!(preview.text, "abcd");
    }

    #[test]
    fn test_user_errors() {
        assert!(VizError::NoReadableText.is_user_error());
        assert!(VizError::InvalidPdf("bad header".into()).is_user_error());
        assert!(!VizError::Render("boom".into()).is_user_error());
    }

    #[test]
    fn test_no_text_message_matches_ui() {
        assert_eq!(VizError::NoReadableText.to_string(), "No readable text found in this PDF.");
    }
}
