//! Relation data model and the in-memory thesaurus index.
//!
//! A [`ThesaurusIndex`] maps each headword to a [`LexicalRecord`] holding one
//! raw group of lines per [`RelationKind`]. Records are created empty on first
//! reference and mutated as the source parsers fold facts in; rendering treats
//! them as read-only.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// The closed set of relation kinds a headword can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    Synonym,
    Related,
    Independent,
    Antonym,
    Negation,
}

impl RelationKind {
    /// Map a category-token suffix character to its relation kind.
    ///
    /// Returns `None` for unmapped suffixes; the synonym parser skips and logs
    /// those lines.
    pub fn from_suffix(c: char) -> Option<RelationKind> {
        match c {
            '=' => Some(RelationKind::Synonym),
            '#' => Some(RelationKind::Related),
            '@' => Some(RelationKind::Independent),
            _ => None,
        }
    }

    /// Section label used by the markup renderer.
    pub fn label(&self) -> &'static str {
        match self {
            RelationKind::Synonym => "SYNONYM",
            RelationKind::Related => "RELATED",
            RelationKind::Independent => "INDEPENDENT",
            RelationKind::Antonym => "ANTONYM",
            RelationKind::Negation => "NEGATION",
        }
    }

    /// Snapshot field name for this kind.
    pub fn field_name(&self) -> &'static str {
        match self {
            RelationKind::Synonym => "SynonymSet",
            RelationKind::Related => "RelatedSet",
            RelationKind::Independent => "IndependentSet",
            RelationKind::Antonym => "AntonymSet",
            RelationKind::Negation => "NegationSet",
        }
    }

    /// The kinds rendered to the final output, in their fixed section order.
    pub const RENDER_ORDER: [RelationKind; 3] = [
        RelationKind::Antonym,
        RelationKind::Synonym,
        RelationKind::Negation,
    ];

    /// All kinds, in snapshot order.
    pub const ALL: [RelationKind; 5] = [
        RelationKind::Synonym,
        RelationKind::Related,
        RelationKind::Independent,
        RelationKind::Antonym,
        RelationKind::Negation,
    ];
}

/// The five raw relation groups owned by one headword.
///
/// Groups hold the source lines verbatim, duplicates included; deduplication
/// and headword self-removal happen at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexicalRecord {
    synonyms: Vec<String>,
    related: Vec<String>,
    independent: Vec<String>,
    antonyms: Vec<String>,
    negations: Vec<String>,
}

impl LexicalRecord {
    /// Create a record with all groups empty.
    pub fn new() -> LexicalRecord {
        LexicalRecord::default()
    }

    /// Borrow the raw group for a kind.
    pub fn group(&self, kind: RelationKind) -> &[String] {
        match kind {
            RelationKind::Synonym => &self.synonyms,
            RelationKind::Related => &self.related,
            RelationKind::Independent => &self.independent,
            RelationKind::Antonym => &self.antonyms,
            RelationKind::Negation => &self.negations,
        }
    }

    /// Mutably borrow the raw group for a kind.
    pub fn group_mut(&mut self, kind: RelationKind) -> &mut Vec<String> {
        match kind {
            RelationKind::Synonym => &mut self.synonyms,
            RelationKind::Related => &mut self.related,
            RelationKind::Independent => &mut self.independent,
            RelationKind::Antonym => &mut self.antonyms,
            RelationKind::Negation => &mut self.negations,
        }
    }

    /// Append a raw line to the group for a kind.
    pub fn push(&mut self, kind: RelationKind, line: impl Into<String>) {
        self.group_mut(kind).push(line.into());
    }

    /// Whether this record is emitted to the final output.
    ///
    /// Only Antonym, Synonym, and Negation qualify an entry; Related and
    /// Independent groups are auxiliary and never surface on their own.
    pub fn qualifies(&self) -> bool {
        !self.antonyms.is_empty() || !self.synonyms.is_empty() || !self.negations.is_empty()
    }
}

/// One oversized group line found by [`ThesaurusIndex::oversized_lines`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OversizedLine {
    pub word: String,
    pub kind: RelationKind,
    pub line: String,
}

/// Insertion-ordered map from headword to its [`LexicalRecord`].
///
/// The index is an explicit state object owned by the pipeline driver; there
/// are no ambient singletons. Iteration follows population order, which the
/// driver relies on for deterministic output.
#[derive(Debug, Default)]
pub struct ThesaurusIndex {
    records: AHashMap<String, LexicalRecord>,
    order: Vec<String>,
}

impl ThesaurusIndex {
    /// Create an empty index.
    pub fn new() -> ThesaurusIndex {
        ThesaurusIndex::default()
    }

    /// Number of headwords in the index.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the index holds no headwords.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Get-or-create accessor: returns the record for `word`, inserting a
    /// freshly zero-initialized one (and recording insertion order) if absent.
    pub fn entry(&mut self, word: &str) -> &mut LexicalRecord {
        if !self.records.contains_key(word) {
            self.order.push(word.to_string());
            self.records.insert(word.to_string(), LexicalRecord::new());
        }
        self.records.get_mut(word).unwrap()
    }

    /// Look up an existing record.
    pub fn get(&self, word: &str) -> Option<&LexicalRecord> {
        self.records.get(word)
    }

    /// Headwords in population order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Symmetric antonym insert: `a` gains `b` and `b` gains `a`.
    pub fn add_antonym_pair(&mut self, a: &str, b: &str) {
        self.entry(a).push(RelationKind::Antonym, b);
        self.entry(b).push(RelationKind::Antonym, a);
    }

    /// Derive Negation groups from an ordered marker-phrase list.
    ///
    /// For every headword already present (excluding `stopwords`), a marker
    /// qualifies when the headword occurs anywhere inside the marker phrase.
    /// This is an O(words x markers) substring scan; at the scale of the
    /// shipped source lists no index acceleration is needed.
    pub fn derive_negations(&mut self, markers: &[String], stopwords: &AHashSet<String>) {
        for word in &self.order {
            if stopwords.contains(word.as_str()) {
                continue;
            }
            let record = self.records.get_mut(word).unwrap();
            for marker in markers {
                if marker.contains(word.as_str()) {
                    record.negations.push(marker.clone());
                }
            }
        }
    }

    /// Group lines whose character count exceeds `threshold`, in index order.
    pub fn oversized_lines(&self, threshold: usize) -> Vec<OversizedLine> {
        let mut found = Vec::new();
        for word in &self.order {
            let record = &self.records[word];
            for kind in RelationKind::ALL {
                for line in record.group(kind) {
                    if line.chars().count() > threshold {
                        found.push(OversizedLine {
                            word: word.clone(),
                            kind,
                            line: line.clone(),
                        });
                    }
                }
            }
        }
        found
    }

    /// Serialize the full index as an insertion-ordered JSON object.
    ///
    /// `serde_json` is built with `preserve_order`, so the snapshot mirrors
    /// population order.
    pub fn to_json(&self) -> Value {
        let mut root = Map::with_capacity(self.order.len());
        for word in &self.order {
            let record = &self.records[word];
            let mut fields = Map::with_capacity(RelationKind::ALL.len());
            for kind in RelationKind::ALL {
                fields.insert(kind.field_name().to_string(), json!(record.group(kind)));
            }
            root.insert(word.clone(), Value::Object(fields));
        }
        Value::Object(root)
    }
}
