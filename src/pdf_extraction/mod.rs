// PDF extraction module
pub mod lopdf_helper;
pub mod text_extraction;

pub use lopdf_helper::load_pdf_bytes;
pub use text_extraction::{extract_file, extract_from_document, extract_text, ExtractedText};
