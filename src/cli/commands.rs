//! Command implementations for the cilin CLI.

use std::fs::File;
use std::io::BufReader;

use serde_json::{Map, Value};

use crate::cli::args::*;
use crate::dictionary::FileGlossary;
use crate::error::{CilinError, Result};
use crate::pipeline::{self, PipelineConfig};
use crate::relation::RelationKind;
use crate::render::RenderConfig;

/// Execute a CLI command.
pub fn execute_command(args: CilinArgs) -> Result<()> {
    match &args.command {
        Command::Build(build_args) => build(build_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
    }
}

/// Build the markup dictionary.
fn build(args: BuildArgs, cli_args: &CilinArgs) -> Result<()> {
    let glossary = match &args.glossary_file {
        Some(path) => {
            if cli_args.verbosity() > 1 {
                println!("Loading glossary from: {}", path.display());
            }
            FileGlossary::load(path)?
        }
        None => FileGlossary::empty(),
    };

    let config = PipelineConfig {
        synonym_file: args.synonym_file.clone(),
        antonym_file: args.antonym_file.clone(),
        negation_file: args.negation_file.clone(),
        output_file: args.density_output_file(),
        snapshot_file: (!args.no_snapshot).then(|| args.snapshot_file.clone()),
        cache_file: args.cache_file.clone(),
        render: RenderConfig {
            density: args.density,
            include_pinyin: args.include_pinyin,
        },
        max_items: args.max_items.unwrap_or(usize::MAX),
        big_line_threshold: args.big_line_threshold,
    };

    let report = pipeline::run(&config, &glossary)?;

    match cli_args.output_format {
        OutputFormat::Json => {
            let rendered = if cli_args.pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{rendered}");
        }
        OutputFormat::Human => {
            if cli_args.verbosity() > 0 {
                println!("Indexed {} headwords", report.words_indexed);
                println!(
                    "Source lines: {} clusters, {} antonym pairs, {} negation markers",
                    report.synonym_lines, report.antonym_pairs, report.negation_markers
                );
                if report.oversized_lines > 0 {
                    println!(
                        "Oversized group lines: {} (threshold {})",
                        report.oversized_lines, args.big_line_threshold
                    );
                }
                println!(
                    "Cache: {} hits, {} lookups",
                    report.cache_hits, report.cache_misses
                );
                println!(
                    "Created {} items and saved to {} in {} ms",
                    report.entries_rendered,
                    config.output_file.display(),
                    report.elapsed_ms
                );
            }
        }
    }

    Ok(())
}

/// Show per-kind totals for an index snapshot.
fn show_stats(args: StatsArgs, cli_args: &CilinArgs) -> Result<()> {
    let file = File::open(&args.snapshot_file)?;
    let snapshot: Value = serde_json::from_reader(BufReader::new(file))?;
    let records = snapshot
        .as_object()
        .ok_or_else(|| CilinError::invalid_argument("snapshot root must be a JSON object"))?;

    let mut totals: Map<String, Value> = Map::new();
    let mut group_lines = 0u64;
    for kind in RelationKind::ALL {
        let mut words = 0u64;
        let mut lines = 0u64;
        for record in records.values() {
            let group = record
                .get(kind.field_name())
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            if !group.is_empty() {
                words += 1;
            }
            lines += group.len() as u64;
        }
        group_lines += lines;
        totals.insert(
            kind.field_name().to_string(),
            serde_json::json!({ "words": words, "lines": lines }),
        );
    }

    match cli_args.output_format {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "headwords": records.len(),
                "group_lines": group_lines,
                "kinds": totals,
            });
            let rendered = if cli_args.pretty {
                serde_json::to_string_pretty(&summary)?
            } else {
                serde_json::to_string(&summary)?
            };
            println!("{rendered}");
        }
        OutputFormat::Human => {
            println!("Headwords: {}", records.len());
            println!("Group lines: {group_lines}");
            for (field, counts) in &totals {
                println!(
                    "  {field}: {} words, {} lines",
                    counts["words"], counts["lines"]
                );
            }
        }
    }

    Ok(())
}
