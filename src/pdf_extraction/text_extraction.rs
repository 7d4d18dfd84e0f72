// Plain text extraction: every page, in page order, joined into one string
use lopdf::Document;
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;

use super::lopdf_helper::load_pdf_bytes;
use crate::types::{Result, VizError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedText {
    /// Each readable page's text followed by a single space
    pub text: String,
    pub page_count: usize,
    pub readable_pages: usize,
}

impl ExtractedText {
    /// True when nothing but whitespace came out of the document
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

pub fn extract_text(bytes: &[u8]) -> Result<ExtractedText> {
    let start = Instant::now();
    let extracted = guard_decoder(|| {
        let document = load_pdf_bytes(bytes)?;
        Ok(extract_from_document(&document))
    })?;
    log::debug!(
        "Extracted {} chars from {}/{} pages in {:?}",
        extracted.text.len(),
        extracted.readable_pages,
        extracted.page_count,
        start.elapsed()
    );
    Ok(extracted)
}

pub fn extract_file(path: &Path) -> Result<ExtractedText> {
    let bytes = std::fs::read(path)?;
    extract_text(&bytes)
}

/// Run lopdf work so that a decoder panic on hostile input becomes `InvalidPdf`.
pub fn guard_decoder<T>(work: impl FnOnce() -> Result<T>) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(work)).unwrap_or_else(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        log::error!("PDF decoder panicked: {}", reason);
        Err(VizError::InvalidPdf(format!("decoder failed: {}", reason)))
    })
}

pub fn extract_from_document(document: &Document) -> ExtractedText {
    let pages = document.get_pages();
    let mut extracted = ExtractedText {
        page_count: pages.len(),
        ..Default::default()
    };

    // BTreeMap keys: page numbers in ascending order
    for page_num in pages.keys() {
        match document.extract_text(&[*page_num]) {
            Ok(page_text) if !page_text.is_empty() => {
                extracted.text.push_str(&page_text);
                extracted.text.push(' ');
                extracted.readable_pages += 1;
            }
            Ok(_) => log::debug!("Page {} has no text layer", page_num),
            Err(e) => log::warn!("Skipping unreadable page {}: {}", page_num, e),
        }
    }

    extracted
}
