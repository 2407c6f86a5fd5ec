//! # cilin
//!
//! Builds a per-word lexical relation index (synonyms, related terms,
//! independent-usage terms, antonyms, negation markers) from flat line-oriented
//! source lists and renders every qualifying entry into the Pleco flashcard
//! markup format.
//!
//! ## Features
//!
//! - Three line-grammar parsers for synonym clusters, antonym pairs, and
//!   negation markers
//! - Insertion-ordered relation index with symmetric antonym insertion and
//!   substring-derived negation groups
//! - Persistent definition-lookup cache shared across runs
//! - Deterministic control-character markup rendering with three density tiers

pub mod cli;
pub mod dictionary;
pub mod error;
pub mod parser;
pub mod pinyin;
pub mod pipeline;
pub mod relation;
pub mod render;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
