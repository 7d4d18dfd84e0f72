// Word frequency analysis
pub mod ranking;
pub mod summary;
pub mod tokenizer;

pub use ranking::{build_rank_table, top};
pub use summary::summarize;
pub use tokenizer::{count_tokens, tokenize, TokenCounts};
