//! Parser for the antonym pair list.
//!
//! Grammar: `<word1>-<word2>`, split on the first `-`. Each valid line
//! performs a symmetric insert into both words' Antonym groups.

use std::path::Path;

use log::warn;

use crate::error::Result;
use crate::parser::for_each_line;
use crate::relation::ThesaurusIndex;

/// Parse an antonym pair file into `index`, returning the accepted-line count.
pub fn parse_antonym_file(path: &Path, index: &mut ThesaurusIndex, max_items: usize) -> Result<usize> {
    for_each_line(path, max_items, |line| {
        let Some((word1, word2)) = line.split_once('-') else {
            warn!("Invalid format line: {line}");
            return false;
        };

        index.add_antonym_pair(word1, word2);
        true
    })
}
