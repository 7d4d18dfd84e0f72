// pdf-wordviz: PDF word frequency analysis and visualization
pub mod analysis;
pub mod config;
pub mod pdf_extraction;
pub mod pipeline;
pub mod render;
pub mod server;
pub mod types;

pub use config::VizConfig;
pub use pipeline::{analyze, analyze_file, Analysis};
pub use types::{RankedEntry, Result, Summary, TextPreview, VizError};
