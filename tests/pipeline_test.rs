//! End-to-end pipeline tests over temporary directories.

use std::cell::Cell;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use cilin::dictionary::{Definition, FileGlossary, Glossary};
use cilin::error::Result;
use cilin::pipeline::{self, PipelineConfig};
use cilin::render::{Density, RenderConfig};

const SYNONYM_SOURCE: &str = "Aa01A01= 高兴 开心 快乐\nBb02B02# 特别 格外\n";
const ANTONYM_SOURCE: &str = "好-坏\n";
const NEGATION_SOURCE: &str = "不高兴\t80 n\n";

fn write_sources(dir: &Path) {
    fs::write(dir.join("dict_synonym.txt"), SYNONYM_SOURCE).unwrap();
    fs::write(dir.join("dict_antonym.txt"), ANTONYM_SOURCE).unwrap();
    fs::write(dir.join("dict_negative.txt"), NEGATION_SOURCE).unwrap();
}

fn config(dir: &Path) -> PipelineConfig {
    PipelineConfig::with_data_dir(dir)
}

/// Glossary stub that counts collaborator invocations.
struct CountingGlossary {
    calls: Cell<u64>,
}

impl CountingGlossary {
    fn new() -> CountingGlossary {
        CountingGlossary {
            calls: Cell::new(0),
        }
    }
}

impl Glossary for CountingGlossary {
    fn lookup(&self, _word: &str) -> Result<Vec<Definition>> {
        self.calls.set(self.calls.get() + 1);
        Ok(vec![])
    }

    fn pinyin(&self, word: &str) -> String {
        word.to_string()
    }
}

#[test]
fn test_low_density_output_bytes() {
    let dir = TempDir::new().unwrap();
    write_sources(dir.path());

    let config = config(dir.path());
    let report = pipeline::run(&config, &FileGlossary::empty()).unwrap();

    // 特别 and 格外 only carry Related groups and must not be emitted.
    assert_eq!(report.words_indexed, 7);
    assert_eq!(report.entries_rendered, 5);
    assert_eq!(report.synonym_lines, 2);
    assert_eq!(report.antonym_pairs, 1);
    assert_eq!(report.negation_markers, 1);

    let output = fs::read_to_string(&config.output_file).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        [
            // Population order: the synonym cluster, then the antonym pair.
            "高兴\t\t\u{EAB1}\u{EAB2}SYNONYM\u{EAB3}\u{EAB1}\
             » \u{EAB8}开心\u{EABB}、\u{EAB8}快乐\u{EABB}\u{EAB1}\
             \u{EAB2}NEGATION\u{EAB3}\u{EAB1}» \u{EAB8}不高兴\u{EABB}\u{EAB1}",
            "开心\t\t\u{EAB1}\u{EAB2}SYNONYM\u{EAB3}\u{EAB1}\
             » \u{EAB8}快乐\u{EABB}、\u{EAB8}高兴\u{EABB}\u{EAB1}",
            "快乐\t\t\u{EAB1}\u{EAB2}SYNONYM\u{EAB3}\u{EAB1}\
             » \u{EAB8}开心\u{EABB}、\u{EAB8}高兴\u{EABB}\u{EAB1}",
            "好\t\t\u{EAB1}\u{EAB2}ANTONYM\u{EAB3}\u{EAB1}» \u{EAB8}坏\u{EABB}\u{EAB1}",
            "坏\t\t\u{EAB1}\u{EAB2}ANTONYM\u{EAB3}\u{EAB1}» \u{EAB8}好\u{EABB}\u{EAB1}",
        ]
    );
}

#[test]
fn test_snapshot_contents() {
    let dir = TempDir::new().unwrap();
    write_sources(dir.path());

    let config = config(dir.path());
    pipeline::run(&config, &FileGlossary::empty()).unwrap();

    let snapshot: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config.snapshot_file.as_ref().unwrap()).unwrap())
            .unwrap();

    assert_eq!(snapshot["高兴"]["NegationSet"], serde_json::json!(["不高兴"]));
    assert_eq!(snapshot["好"]["AntonymSet"], serde_json::json!(["坏"]));
    // Non-qualifying records still occupy the snapshot.
    assert_eq!(snapshot["特别"]["RelatedSet"], serde_json::json!(["特别 格外"]));
    assert_eq!(snapshot["特别"]["SynonymSet"], serde_json::json!([]));
}

#[test]
fn test_runs_are_deterministic() {
    let dir = TempDir::new().unwrap();
    write_sources(dir.path());
    let config = config(dir.path());

    pipeline::run(&config, &FileGlossary::empty()).unwrap();
    let first = fs::read_to_string(&config.output_file).unwrap();

    pipeline::run(&config, &FileGlossary::empty()).unwrap();
    let second = fs::read_to_string(&config.output_file).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_cache_shared_across_runs() {
    let dir = TempDir::new().unwrap();
    write_sources(dir.path());

    let mut config = config(dir.path());
    config.render = RenderConfig {
        density: Density::Mid,
        include_pinyin: true,
    };

    let glossary = CountingGlossary::new();
    let report = pipeline::run(&config, &glossary).unwrap();
    // One collaborator call per rendered headword (mid density looks up the
    // headword only, not the linked tokens).
    assert_eq!(report.cache_misses, 5);
    assert_eq!(glossary.calls.get(), 5);

    // Second run over the persisted cache file: no new collaborator calls.
    let report = pipeline::run(&config, &glossary).unwrap();
    assert_eq!(report.cache_misses, 0);
    assert_eq!(report.cache_hits, 5);
    assert_eq!(glossary.calls.get(), 5);
}

#[test]
fn test_cache_file_persists_empty_results() {
    let dir = TempDir::new().unwrap();
    write_sources(dir.path());

    let mut config = config(dir.path());
    config.render = RenderConfig {
        density: Density::Mid,
        include_pinyin: false,
    };

    pipeline::run(&config, &CountingGlossary::new()).unwrap();

    let cache: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config.cache_file).unwrap()).unwrap();
    let entries = cache.as_object().unwrap();
    assert_eq!(entries.len(), 5);
    // Empty lookup results are persisted, not retried.
    assert!(entries.contains_key("高兴"));
}

#[test]
fn test_max_items_caps_rendered_entries() {
    let dir = TempDir::new().unwrap();
    write_sources(dir.path());

    let mut config = config(dir.path());
    config.max_items = 2;

    let report = pipeline::run(&config, &FileGlossary::empty()).unwrap();
    assert_eq!(report.entries_rendered, 2);

    let output = fs::read_to_string(&config.output_file).unwrap();
    assert_eq!(output.lines().count(), 2);
}

#[test]
fn test_malformed_lines_do_not_abort() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("dict_synonym.txt"),
        "garbage\nAa01A01! 无 效\nAa01A02= 好 良\n",
    )
    .unwrap();
    fs::write(dir.path().join("dict_antonym.txt"), "缺分隔符\n好-坏\n").unwrap();
    fs::write(dir.path().join("dict_negative.txt"), "没有制表符\n不好\t1\n").unwrap();

    let config = config(dir.path());
    let report = pipeline::run(&config, &FileGlossary::empty()).unwrap();

    assert_eq!(report.synonym_lines, 1);
    assert_eq!(report.antonym_pairs, 1);
    assert_eq!(report.negation_markers, 1);
    assert_eq!(report.words_indexed, 3);
}

#[test]
fn test_missing_source_is_fatal() {
    let dir = TempDir::new().unwrap();
    // No source files at all.
    let config = config(dir.path());
    assert!(pipeline::run(&config, &FileGlossary::empty()).is_err());
}

#[test]
fn test_oversized_lines_reported() {
    let dir = TempDir::new().unwrap();
    write_sources(dir.path());

    let mut config = config(dir.path());
    config.big_line_threshold = 5;

    let report = pipeline::run(&config, &FileGlossary::empty()).unwrap();
    // The three-word cluster line lands in all three member records.
    assert_eq!(report.oversized_lines, 3);
}
