// Word tokenizer and counter
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Letters, numbers and underscore. Combining marks and join controls separate
// words, so decomposed "cafe\u{301}" yields "cafe".
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{N}_]+").expect("static regex"));

/// Word -> occurrence count, in order of first occurrence in the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenCounts {
    counts: IndexMap<String, usize>,
}

impl TokenCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, token: &str) {
        match self.counts.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(token.to_string(), 1);
            }
        }
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.counts.get(token).copied()
    }

    /// Entries in first-occurrence order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    pub fn unique(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for TokenCounts {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counts = TokenCounts::new();
        for token in iter {
            counts.add(token);
        }
        counts
    }
}

/// Lowercase `text` and return every maximal word-character run.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}

/// Count tokens without materializing the token list.
pub fn count_tokens(text: &str) -> TokenCounts {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered).map(|m| m.as_str()).collect()
}
