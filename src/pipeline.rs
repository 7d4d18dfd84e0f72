// Upload -> extract -> tokenize -> count -> rank, as one request/response call
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

use crate::analysis::{build_rank_table, count_tokens, summarize, TokenCounts};
use crate::config::AnalysisConfig;
use crate::pdf_extraction::{self, ExtractedText};
use crate::types::{RankedEntry, Result, Summary, TextPreview, VizError};

/// Everything the presentation layer needs for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
    pub preview: TextPreview,
    pub counts: TokenCounts,
    pub ranked: Vec<RankedEntry>,
}

pub fn analyze(source: &str, bytes: &[u8], config: &AnalysisConfig) -> Result<Analysis> {
    let start = Instant::now();
    log::info!("Analyzing '{}' ({} bytes)", source, bytes.len());

    let extracted = pdf_extraction::extract_text(bytes)?;
    let analysis = analyze_extracted(source, &extracted, config)?;

    log::info!(
        "'{}': {} words, {} unique, {}/{} pages readable, took {:?}",
        source,
        analysis.summary.total_words,
        analysis.summary.unique_words,
        analysis.summary.readable_pages,
        analysis.summary.page_count,
        start.elapsed()
    );
    Ok(analysis)
}

pub fn analyze_file(path: &Path, config: &AnalysisConfig) -> Result<Analysis> {
    let source = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document.pdf");
    log::info!("Analyzing {}", path.display());
    let extracted = pdf_extraction::extract_file(path)?;
    analyze_extracted(source, &extracted, config)
}

/// Runs everything after text extraction; split out so text from any source can be analyzed.
pub fn analyze_extracted(source: &str, extracted: &ExtractedText, config: &AnalysisConfig) -> Result<Analysis> {
    if extracted.is_blank() {
        return Err(VizError::NoReadableText);
    }

    let counts = count_tokens(&extracted.text);
    if counts.is_empty() {
        return Err(VizError::NoWords);
    }

    let ranked = build_rank_table(&counts);
    let summary = summarize(&counts, extracted);
    let preview = TextPreview::from_text(&extracted.text, config.preview_chars);
    log::debug!("Rank table built with {} entries", ranked.len());

    Ok(Analysis {
        source: source.to_string(),
        generated_at: Utc::now(),
        summary,
        preview,
        counts,
        ranked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(text: &str) -> ExtractedText {
        ExtractedText { text: text.to_string(), page_count: 1, readable_pages: 1 }
    }

    #[test]
    fn test_blank_text_is_no_readable_text() {
        let err = analyze_extracted("x.pdf", &extracted("   \n "), &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, VizError::NoReadableText));
        let err = analyze_extracted("x.pdf", &extracted(""), &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, VizError::NoReadableText));
    }

    #[test]
    fn test_punctuation_only_is_no_words() {
        let err = analyze_extracted("x.pdf", &extracted("... --- !!!"), &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, VizError::NoWords));
    }

    #[test]
    fn test_cat_cat_dog() {
        let analysis = analyze_extracted("pets.pdf", &extracted("cat cat dog "), &AnalysisConfig::default()).unwrap();
        assert_eq!(analysis.summary.total_words, 3);
        assert_eq!(analysis.summary.unique_words, 2);
        assert_eq!(analysis.ranked[0], RankedEntry::new("cat", 2, 1));
        assert_eq!(analysis.ranked[1], RankedEntry::new("dog", 1, 2));
        assert_eq!(analysis.source, "pets.pdf");
    }

    #[test]
    fn test_preview_truncation() {
        let config = AnalysisConfig { preview_chars: 5 };
        let analysis = analyze_extracted("x.pdf", &extracted("abcdefgh ij"), &config).unwrap();
        assert!(analysis.preview.truncated);
        assert_eq!(analysis.preview.display(), "abcde...");
    }

    #[test]
    fn test_invalid_bytes_reported() {
        let err = analyze("notes.txt", b"hello there", &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, VizError::InvalidPdf(_)));
    }
}
