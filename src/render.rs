//! Markup rendering of aggregated lexical records.
//!
//! [`MarkupRenderer`] turns one headword's [`LexicalRecord`] into a Pleco
//! markup block: headword and pinyin fields, an optional definition block,
//! then one section per non-empty rendered relation kind in the fixed order
//! Antonym, Synonym, Negation. All internal newlines are collapsed into the
//! reserved control character so an entry is exactly one physical output
//! line. Rendering is deterministic: the same record and configuration always
//! produce byte-identical output.

use std::collections::BTreeSet;

use clap::ValueEnum;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dictionary::{DefinitionCache, Glossary};
use crate::pinyin::numbered_to_accented;
use crate::relation::{LexicalRecord, RelationKind};

pub mod markup;

use self::markup::{
    DEF_SEPARATOR, GROUP_MARKER, NEWLINE, SEPARATOR_IDEOGRAPHIC, SEPARATOR_SPACE, bold,
    circled_number, italic, link,
};

lazy_static! {
    /// Alternate-script disambiguation prefix: a CJK run followed by a pipe.
    static ref PIPE_PREFIX_RE: Regex = Regex::new(r"[\x{4e00}-\x{9fff}]+\|").unwrap();
    /// Embedded numbered-tone pinyin fragment, brackets included.
    static ref BRACKET_PINYIN_RE: Regex = Regex::new(r"\[([^\]]+)\]").unwrap();
}

/// Output density tier, resolved once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    /// Relation links only: no pinyin, no definitions, `、` separators.
    Low,
    /// Adds per-token pinyin, space separators.
    Mid,
    /// Replaces per-token pinyin with full nested definition blocks.
    High,
}

/// Rendering configuration threaded through every call.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub density: Density,
    /// Fill the second tab field of each entry with the headword's pinyin.
    pub include_pinyin: bool,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            density: Density::Low,
            include_pinyin: false,
        }
    }
}

/// Clean one gloss string for output: rewrite embedded `[hao3]`-style
/// fragments to accented pinyin, then strip alternate-script pipe prefixes.
fn clean_meaning(meaning: &str) -> String {
    let trimmed = meaning.trim();
    let accented = BRACKET_PINYIN_RE.replace_all(trimmed, |caps: &regex::Captures| {
        format!(" {}", numbered_to_accented(&caps[1]))
    });
    PIPE_PREFIX_RE.replace_all(&accented, "").into_owned()
}

/// Renders lexical records against a definition cache and glossary.
pub struct MarkupRenderer<'a> {
    config: RenderConfig,
    cache: &'a mut DefinitionCache,
    glossary: &'a dyn Glossary,
}

impl<'a> MarkupRenderer<'a> {
    /// Create a renderer borrowing the run's cache and glossary.
    pub fn new(
        config: RenderConfig,
        cache: &'a mut DefinitionCache,
        glossary: &'a dyn Glossary,
    ) -> MarkupRenderer<'a> {
        MarkupRenderer {
            config,
            cache,
            glossary,
        }
    }

    /// Render one qualifying record as a single physical output line
    /// (trailing line break not included).
    pub fn render_entry(&mut self, word: &str, record: &LexicalRecord) -> String {
        let pinyin_field = if self.config.include_pinyin {
            self.glossary.pinyin(word)
        } else {
            String::new()
        };

        let mut contents = format!("{word}\t{pinyin_field}\t");
        contents.push_str(&self.definition_block(word, true));

        for kind in RelationKind::RENDER_ORDER {
            let raw = record.group(kind);
            if !raw.is_empty() {
                contents.push_str(&bold(kind.label()));
                contents.push('\n');
                contents.push_str(&self.linked_group(word, raw));
            }
        }

        contents.replace('\n', &NEWLINE.to_string())
    }

    /// Render the definition block for `word`.
    ///
    /// Low density performs no lookup at all and emits a bare newline. At mid
    /// and high density a word without definitions renders as italic pinyin
    /// only; otherwise each definition contributes its accented pinyin and
    /// `"; "`-joined cleaned meanings, definitions separated by `/` with the
    /// trailing separator trimmed. The bold DEFINITION label appears at top
    /// level only, never nested.
    fn definition_block(&mut self, word: &str, top_level: bool) -> String {
        if self.config.density == Density::Low {
            return "\n".to_string();
        }

        let definitions = self.cache.lookup(word, self.glossary).to_vec();
        if definitions.is_empty() {
            return format!("{}\n", italic(&self.glossary.pinyin(word)));
        }

        let mut contents = String::new();
        if top_level {
            contents.push_str(&bold("DEFINITION"));
            contents.push('\n');
        }

        for definition in &definitions {
            contents.push_str(&italic(
                &numbered_to_accented(&definition.pinyin).replace(' ', ""),
            ));
            contents.push(' ');

            let meanings: Vec<String> = definition.meanings.iter().map(|m| clean_meaning(m)).collect();
            contents.push_str(&meanings.join("; "));
            contents.push(DEF_SEPARATOR);
        }

        if contents.ends_with(DEF_SEPARATOR) {
            contents.pop();
        }
        contents.push('\n');

        contents
    }

    /// Render one relation group: deduplicated, sorted raw lines, each line a
    /// prefixed row of linked tokens with the owning headword removed.
    fn linked_group(&mut self, headword: &str, raw_lines: &[String]) -> String {
        // Dedup and sort the raw lines before numbering.
        let lines: BTreeSet<&str> = raw_lines.iter().map(String::as_str).collect();

        let mut contents = String::new();
        for (index, line) in lines.iter().enumerate() {
            let mut tokens: BTreeSet<&str> = line.split(' ').collect();
            tokens.remove(headword);

            let mut words = Vec::with_capacity(tokens.len());
            for token in tokens {
                let word = match self.config.density {
                    Density::High => {
                        format!("{} {}", link(token), self.definition_block(token, false))
                    }
                    Density::Mid => format!("{} {}", link(token), self.glossary.pinyin(token)),
                    Density::Low => link(token),
                };
                words.push(word);
            }

            let (prefix, separator) = match self.config.density {
                Density::Low => (GROUP_MARKER.to_string(), SEPARATOR_IDEOGRAPHIC),
                Density::Mid | Density::High => (circled_number(index + 1), SEPARATOR_SPACE),
            };

            contents.push_str(&prefix);
            contents.push(' ');
            contents.push_str(&words.join(separator));
            contents.push('\n');
        }

        contents
    }
}
