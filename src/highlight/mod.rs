//! Snippet highlighting
//!
//! This module turns reference snippet text into classified spans for the code pane:
//! - [`tokenizer`]: Line tokenization (line text → ordered, gap-free [`Token`]s)
//!
//! # Classification
//!
//! Four regex classifiers run independently over each line (keywords, recognized
//! API call names, quoted literals, `//` comments). Overlaps are settled by a greedy
//! left-to-right pass over the pooled matches, so a span claimed first is never
//! subdivided by a later classifier. Anything unclaimed is [`TokenKind::Default`].
//!
//! Highlighting is purely cosmetic: it never fails and always covers the whole line.

pub mod tokenizer;

pub use tokenizer::{tokenize, Token, TokenKind, PLACEHOLDER};
