// Plain-text summary for the terminal
use std::fmt::Write as _;

use crate::analysis::top;
use crate::pipeline::Analysis;

pub fn text_report(analysis: &Analysis, rows: usize) -> String {
    let summary = &analysis.summary;
    let mut out = String::new();
    let _ = writeln!(out, "Source: {}", analysis.source);
    let _ = writeln!(out, "Total Words: {}", summary.total_words);
    let _ = writeln!(out, "Unique Words: {}", summary.unique_words);
    let _ = writeln!(out, "Pages: {} ({} with text)", summary.page_count, summary.readable_pages);

    let shown = top(&analysis.ranked, rows);
    if shown.is_empty() {
        return out;
    }

    let width = shown.iter().map(|e| e.word.chars().count()).max().unwrap_or(4).max(4);
    let _ = writeln!(out);
    let _ = writeln!(out, "{:>6}  {:>8}  {}", "Rank", "Count", "Word");
    let _ = writeln!(out, "{:->6}  {:->8}  {:-<width$}", "", "", "", width = width);
    for entry in shown {
        let _ = writeln!(out, "{:>6}  {:>8}  {}", entry.rank, entry.count, entry.word);
    }
    if analysis.ranked.len() > shown.len() {
        let _ = writeln!(out, "... {} more", analysis.ranked.len() - shown.len());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::pdf_extraction::ExtractedText;
    use crate::pipeline::analyze_extracted;

    fn analysis(text: &str) -> Analysis {
        let extracted = ExtractedText { text: text.into(), page_count: 1, readable_pages: 1 };
        analyze_extracted("t.pdf", &extracted, &AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn test_summary_lines() {
        let report = text_report(&analysis("cat cat dog"), 10);
        assert!(report.contains("Total Words: 3"));
        assert!(report.contains("Unique Words: 2"));
        assert!(report.contains("     1         2  cat"));
        assert!(!report.contains("more"));
    }

    #[test]
    fn test_row_limit() {
        let report = text_report(&analysis("a b c d e"), 2);
        assert!(report.contains("... 3 more"));
    }
}
