// Rank table: entries sorted by count descending, ties by first occurrence
use super::tokenizer::TokenCounts;
use crate::types::RankedEntry;

pub fn build_rank_table(counts: &TokenCounts) -> Vec<RankedEntry> {
    let mut entries: Vec<(&str, usize)> = counts.iter().collect();
    // sort_by is stable, so equal counts keep first-occurrence order
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (word, count))| RankedEntry::new(word, count, i + 1))
        .collect()
}

/// The `n` most frequent entries.
pub fn top(ranked: &[RankedEntry], n: usize) -> &[RankedEntry] {
    &ranked[..ranked.len().min(n)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenizer::count_tokens;

    fn counts_of(pairs: &[(&str, usize)]) -> TokenCounts {
        let mut counts = TokenCounts::new();
        for (word, n) in pairs {
            for _ in 0..*n {
                counts.add(word);
            }
        }
        counts
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        let ranked = build_rank_table(&counts_of(&[("a", 3), ("b", 1), ("c", 3)]));
        assert_eq!(
            ranked,
            vec![
                RankedEntry::new("a", 3, 1),
                RankedEntry::new("c", 3, 2),
                RankedEntry::new("b", 1, 3),
            ]
        );
    }

    #[test]
    fn test_cat_cat_dog() {
        let ranked = build_rank_table(&count_tokens("cat cat dog"));
        assert_eq!(ranked, vec![RankedEntry::new("cat", 2, 1), RankedEntry::new("dog", 1, 2)]);
    }

    #[test]
    fn test_empty_counts() {
        assert!(build_rank_table(&TokenCounts::new()).is_empty());
    }

    #[test]
    fn test_ranks_are_positions() {
        let text = "z y x y z z w v v v v";
        let ranked = build_rank_table(&count_tokens(text));
        assert_eq!(ranked.len(), count_tokens(text).unique());
        for (i, entry) in ranked.iter().enumerate() {
            assert_eq!(entry.rank, i + 1);
        }
        assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_idempotent() {
        let text = "to be or not to be that is the question";
        let first = build_rank_table(&count_tokens(text));
        let second = build_rank_table(&count_tokens(text));
        assert_eq!(first, second);
    }

    #[test]
    fn test_top_clamps() {
        let ranked = build_rank_table(&count_tokens("a b c"));
        assert_eq!(top(&ranked, 2).len(), 2);
        assert_eq!(top(&ranked, 10).len(), 3);
    }
}
