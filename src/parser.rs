//! Line-grammar parsers for the three flat source lists.
//!
//! Each parser reads a UTF-8 text file line by line, trims trailing
//! whitespace, skips blank lines, and stops once `max_items` lines have been
//! accepted. Malformed lines are logged and skipped; parsing never fails on
//! content, only on I/O.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;

pub mod antonym;
pub mod negation;
pub mod synonym;

pub use self::antonym::parse_antonym_file;
pub use self::negation::{apply_negation_file, parse_negation_file};
pub use self::synonym::parse_synonym_file;

/// Read `path` and feed each trimmed, non-blank line to `handle`.
///
/// `handle` returns `true` when it accepted the line; the loop stops after
/// `max_items` accepted lines. Returns the accepted-line count.
fn for_each_line<F>(path: &Path, max_items: usize, mut handle: F) -> Result<usize>
where
    F: FnMut(&str) -> bool,
{
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut accepted = 0;
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if accepted >= max_items {
            break;
        }
        if handle(line) {
            accepted += 1;
        }
    }

    Ok(accepted)
}
