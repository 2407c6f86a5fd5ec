//! Parser for the synonym/related/independent cluster list.
//!
//! Grammar: `<category-token><space><word1> <word2> ... <wordN>`. The category
//! token's final character selects the relation kind (`=` synonym, `#`
//! related, `@` independent); any other suffix is logged and skipped.

use std::path::Path;

use log::warn;

use crate::error::Result;
use crate::parser::for_each_line;
use crate::relation::{RelationKind, ThesaurusIndex};

/// Parse a cluster file into `index`, returning the accepted-line count.
///
/// Every word of a cluster receives the entire remaining word-list string as
/// one group line under its matching relation set, itself included; headword
/// self-removal is deferred to render time.
pub fn parse_synonym_file(path: &Path, index: &mut ThesaurusIndex, max_items: usize) -> Result<usize> {
    for_each_line(path, max_items, |line| {
        let Some((category, words)) = line.split_once(' ') else {
            warn!("Invalid format line: {line}");
            return false;
        };

        let Some(kind) = category.chars().last().and_then(RelationKind::from_suffix) else {
            warn!("Incorrect line: {line}");
            return false;
        };

        for word in words.split_whitespace() {
            index.entry(word).push(kind, words);
        }
        true
    })
}
