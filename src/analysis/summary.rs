// Summary statistics over a count map
use super::tokenizer::TokenCounts;
use crate::pdf_extraction::ExtractedText;
use crate::types::Summary;

pub fn summarize(counts: &TokenCounts, extracted: &ExtractedText) -> Summary {
    Summary {
        total_words: counts.total(),
        unique_words: counts.unique(),
        page_count: extracted.page_count,
        readable_pages: extracted.readable_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenizer::count_tokens;

    #[test]
    fn test_totals() {
        let extracted = ExtractedText { text: "cat cat dog ".into(), page_count: 3, readable_pages: 1 };
        let summary = summarize(&count_tokens(&extracted.text), &extracted);
        assert_eq!(summary.total_words, 3);
        assert_eq!(summary.unique_words, 2);
        assert_eq!(summary.page_count, 3);
        assert_eq!(summary.readable_pages, 1);
    }

    #[test]
    fn test_empty_text_zero_counts() {
        let extracted = ExtractedText::default();
        let summary = summarize(&count_tokens(""), &extracted);
        assert_eq!((summary.total_words, summary.unique_words), (0, 0));
    }
}
