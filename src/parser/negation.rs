//! Parser for the negation-marker list.
//!
//! Grammar: `<word><TAB><ignored-remainder>`. Only the first field is used;
//! marker phrases are collected in file order. The index derives each
//! headword's Negation group from the collected markers by substring matching
//! ([`ThesaurusIndex::derive_negations`]).

use std::path::Path;

use ahash::AHashSet;
use log::warn;

use crate::error::Result;
use crate::parser::for_each_line;
use crate::relation::ThesaurusIndex;

/// Single-character negators too frequent to be useful as headword matches.
pub const DEFAULT_STOPWORDS: [&str; 2] = ["不", "没"];

/// The default stopword exclusion set for negation derivation.
pub fn default_stopwords() -> AHashSet<String> {
    DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect()
}

/// Parse a negation-marker file, returning the marker phrases in file order.
pub fn parse_negation_file(path: &Path, max_items: usize) -> Result<Vec<String>> {
    let mut markers = Vec::new();
    for_each_line(path, max_items, |line| {
        let Some((word, _rest)) = line.split_once('\t') else {
            warn!("Invalid format line: {line}");
            return false;
        };

        markers.push(word.to_string());
        true
    })?;

    Ok(markers)
}

/// Parse a marker file and derive Negation groups for every headword already
/// present in `index`, excluding the default stopwords. Returns the marker
/// count.
pub fn apply_negation_file(
    path: &Path,
    index: &mut ThesaurusIndex,
    max_items: usize,
) -> Result<usize> {
    let markers = parse_negation_file(path, max_items)?;
    index.derive_negations(&markers, &default_stopwords());
    Ok(markers.len())
}
