//! Pipeline driver: parse -> aggregate -> snapshot -> render -> serialize.
//!
//! The driver owns every piece of mutable state (the relation index and the
//! definition cache), threads the render configuration resolved once per run
//! through all rendering calls, and flushes the cache on every exit path.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::dictionary::{DefinitionCache, Glossary};
use crate::error::Result;
use crate::parser::{apply_negation_file, parse_antonym_file, parse_synonym_file};
use crate::relation::ThesaurusIndex;
use crate::render::{MarkupRenderer, RenderConfig};

/// Default character-count threshold for the oversized-line summary.
pub const DEFAULT_BIG_LINE_THRESHOLD: usize = 50;

/// Configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Synonym/related/independent cluster source list.
    pub synonym_file: PathBuf,
    /// Antonym pair source list.
    pub antonym_file: PathBuf,
    /// Negation-marker source list.
    pub negation_file: PathBuf,
    /// Rendered markup output file.
    pub output_file: PathBuf,
    /// Optional structured snapshot of the full relation index.
    pub snapshot_file: Option<PathBuf>,
    /// Persistent definition-lookup cache file.
    pub cache_file: PathBuf,
    /// Rendering configuration (density tier, pinyin toggle).
    pub render: RenderConfig,
    /// Maximum accepted lines per source and rendered entries; a debug aid.
    pub max_items: usize,
    /// Character-count threshold for the oversized-line summary.
    pub big_line_threshold: usize,
}

impl PipelineConfig {
    /// A configuration with conventional file names rooted at `dir`.
    pub fn with_data_dir(dir: impl Into<PathBuf>) -> PipelineConfig {
        let dir = dir.into();
        PipelineConfig {
            synonym_file: dir.join("dict_synonym.txt"),
            antonym_file: dir.join("dict_antonym.txt"),
            negation_file: dir.join("dict_negative.txt"),
            output_file: dir.join("ChineseThesaurus-Pleco.txt"),
            snapshot_file: Some(dir.join("thesaurus_dict.json")),
            cache_file: dir.join("lookups.json"),
            render: RenderConfig::default(),
            max_items: usize::MAX,
            big_line_threshold: DEFAULT_BIG_LINE_THRESHOLD,
        }
    }
}

/// Counters reported after a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Headwords present in the relation index.
    pub words_indexed: usize,
    /// Accepted lines from the synonym cluster source.
    pub synonym_lines: usize,
    /// Accepted pairs from the antonym source.
    pub antonym_pairs: usize,
    /// Marker phrases collected from the negation source.
    pub negation_markers: usize,
    /// Entries written to the markup output file.
    pub entries_rendered: usize,
    /// Group lines exceeding the configured length threshold.
    pub oversized_lines: usize,
    /// Definition-cache hits during this run.
    pub cache_hits: u64,
    /// Collaborator lookups performed during this run.
    pub cache_misses: u64,
    /// Wall-clock duration of the run.
    pub elapsed_ms: u64,
}

/// Run the full pipeline, returning the run report.
///
/// The cache is loaded before any parsing and saved whether the run succeeds
/// or fails; a failed save is logged on the error path so the original error
/// is preserved.
pub fn run(config: &PipelineConfig, glossary: &dyn Glossary) -> Result<PipelineReport> {
    let start = Instant::now();
    let mut cache = DefinitionCache::load(&config.cache_file);

    let result = run_inner(config, glossary, &mut cache, start);

    if let Err(e) = cache.save(&config.cache_file) {
        warn!("Failed to persist lookup cache to {}: {e}", config.cache_file.display());
    }

    result
}

fn run_inner(
    config: &PipelineConfig,
    glossary: &dyn Glossary,
    cache: &mut DefinitionCache,
    start: Instant,
) -> Result<PipelineReport> {
    let mut index = ThesaurusIndex::new();

    info!("Reading {}...", config.synonym_file.display());
    let synonym_lines = parse_synonym_file(&config.synonym_file, &mut index, config.max_items)?;

    info!("Reading {}...", config.antonym_file.display());
    let antonym_pairs = parse_antonym_file(&config.antonym_file, &mut index, config.max_items)?;

    info!("Reading {}...", config.negation_file.display());
    let negation_markers = apply_negation_file(&config.negation_file, &mut index, config.max_items)?;

    info!("Indexed {} headwords", index.len());

    let oversized = index.oversized_lines(config.big_line_threshold);
    for item in &oversized {
        debug!(
            "Oversized {} line for {}: {}",
            item.kind.label(),
            item.word,
            item.line
        );
    }
    if !oversized.is_empty() {
        warn!(
            "{} group lines exceed {} characters",
            oversized.len(),
            config.big_line_threshold
        );
    }

    if let Some(snapshot_file) = &config.snapshot_file {
        let snapshot = serde_json::to_string_pretty(&index.to_json())?;
        fs::write(snapshot_file, snapshot)?;
        info!("Wrote index snapshot to {}", snapshot_file.display());
    }

    info!("Generating {}...", config.output_file.display());
    let output = File::create(&config.output_file)?;
    let mut writer = BufWriter::new(output);
    let mut renderer = MarkupRenderer::new(config.render, cache, glossary);

    let mut entries_rendered = 0;
    for word in index.words() {
        let record = index.get(word).unwrap();
        if !record.qualifies() {
            continue;
        }
        if entries_rendered >= config.max_items {
            break;
        }

        let entry = renderer.render_entry(word, record);
        writeln!(writer, "{entry}")?;
        entries_rendered += 1;
    }
    writer.flush()?;

    info!(
        "Created {} items and saved to {}",
        entries_rendered,
        config.output_file.display()
    );

    Ok(PipelineReport {
        words_indexed: index.len(),
        synonym_lines,
        antonym_pairs,
        negation_markers,
        entries_rendered,
        oversized_lines: oversized.len(),
        cache_hits: cache.hits(),
        cache_misses: cache.misses(),
        elapsed_ms: start.elapsed().as_millis() as u64,
    })
}
