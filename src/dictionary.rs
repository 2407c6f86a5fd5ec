//! Definitions, the external glossary collaborator, and the persistent
//! definition-lookup cache.
//!
//! The actual headword-to-definition lookup service is an external
//! collaborator behind the [`Glossary`] trait; the crate consumes and caches
//! it but does not reimplement it. [`FileGlossary`] is a file-backed
//! implementation so the binary can run standalone, and tests plug in
//! counting stubs.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use ahash::AHashMap;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pinyin::numbered_to_accented;

/// One dictionary definition for a headword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// Numbered-tone pinyin as stored by the upstream dictionary (`hao3 kan4`).
    pub pinyin: String,
    /// Gloss strings in dictionary order.
    pub meanings: Vec<String>,
}

/// The external definition-lookup collaborator surface.
///
/// `lookup` returns the definitions for a word (empty means not found) and may
/// fail; failures are cached by [`DefinitionCache`] as an explicit not-found
/// marker and never abort the pipeline. `pinyin` returns the romanized reading
/// of a word and is assumed cheap enough to call uncached.
pub trait Glossary {
    /// Look up the definitions for `word`.
    fn lookup(&self, word: &str) -> Result<Vec<Definition>>;

    /// The diacritic-marked pinyin reading of `word`.
    fn pinyin(&self, word: &str) -> String;
}

/// One entry of a [`FileGlossary`] word list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlossaryEntry {
    /// Diacritic-marked reading; derived from the first definition if absent.
    #[serde(default)]
    pub pinyin: Option<String>,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

/// Glossary backed by a prebuilt JSON word list (`word -> GlossaryEntry`).
#[derive(Debug, Default)]
pub struct FileGlossary {
    entries: AHashMap<String, GlossaryEntry>,
}

impl FileGlossary {
    /// A glossary that knows no words.
    pub fn empty() -> FileGlossary {
        FileGlossary::default()
    }

    /// Load a glossary from a JSON file.
    pub fn load(path: &Path) -> Result<FileGlossary> {
        let file = File::open(path)?;
        let entries: BTreeMap<String, GlossaryEntry> = serde_json::from_reader(BufReader::new(file))?;
        info!("Loaded {} glossary entries from {}", entries.len(), path.display());
        Ok(FileGlossary {
            entries: entries.into_iter().collect(),
        })
    }

    /// Number of known words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the glossary knows no words.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Glossary for FileGlossary {
    fn lookup(&self, word: &str) -> Result<Vec<Definition>> {
        Ok(self
            .entries
            .get(word)
            .map(|entry| entry.definitions.clone())
            .unwrap_or_default())
    }

    fn pinyin(&self, word: &str) -> String {
        match self.entries.get(word) {
            Some(entry) => match &entry.pinyin {
                Some(reading) => reading.clone(),
                None => entry
                    .definitions
                    .first()
                    .map(|d| numbered_to_accented(&d.pinyin))
                    .unwrap_or_else(|| word.to_string()),
            },
            // Unknown words read as themselves, matching upstream behavior.
            None => word.to_string(),
        }
    }
}

/// Persistent cache of definition-lookup outcomes.
///
/// Maps a headword to `Some(definitions)` on success or `None` when the
/// collaborator failed, so a word is queried at most once across runs. The
/// on-disk format is a JSON object whose values are definition arrays or
/// `null` for the not-found marker.
#[derive(Debug, Default)]
pub struct DefinitionCache {
    entries: AHashMap<String, Option<Vec<Definition>>>,
    hits: u64,
    misses: u64,
}

impl DefinitionCache {
    /// Create an empty cache.
    pub fn new() -> DefinitionCache {
        DefinitionCache::default()
    }

    /// Load a cache file. A missing or unreadable file yields an empty cache,
    /// logged but never an error.
    pub fn load(path: &Path) -> DefinitionCache {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                info!("Starting with an empty cache ({}: {e})", path.display());
                return DefinitionCache::new();
            }
        };

        match serde_json::from_reader::<_, BTreeMap<String, Option<Vec<Definition>>>>(
            BufReader::new(file),
        ) {
            Ok(entries) => {
                info!("Loaded {} cached lookups from {}", entries.len(), path.display());
                DefinitionCache {
                    entries: entries.into_iter().collect(),
                    hits: 0,
                    misses: 0,
                }
            }
            Err(e) => {
                warn!("Unreadable cache file {}: {e}; starting empty", path.display());
                DefinitionCache::new()
            }
        }
    }

    /// Look up `word`, consulting the cache before the collaborator.
    ///
    /// A collaborator failure is logged and cached as not-found so it is never
    /// retried. Returns an empty slice for not-found words.
    pub fn lookup(&mut self, word: &str, source: &dyn Glossary) -> &[Definition] {
        if self.entries.contains_key(word) {
            self.hits += 1;
        } else {
            self.misses += 1;
            let outcome = match source.lookup(word) {
                Ok(definitions) => Some(definitions),
                Err(e) => {
                    warn!("Error looking up word '{word}': {e}");
                    None
                }
            };
            self.entries.insert(word.to_string(), outcome);
        }

        self.entries
            .get(word)
            .and_then(|outcome| outcome.as_deref())
            .unwrap_or(&[])
    }

    /// Number of cached outcomes (successes and not-found markers).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no outcomes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cache hits observed during this run.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Collaborator invocations during this run.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Persist the cache to `path`.
    ///
    /// Writes to a sibling temp file and renames over the target so an
    /// interrupted save never corrupts a previously written cache. Keys are
    /// sorted, so re-saving an unchanged cache is byte-idempotent.
    pub fn save(&self, path: &Path) -> Result<()> {
        let sorted: BTreeMap<&String, &Option<Vec<Definition>>> = self.entries.iter().collect();
        let contents = serde_json::to_string_pretty(&sorted)?;

        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}
