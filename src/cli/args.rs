//! Command line argument parsing for the cilin CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::render::Density;

/// cilin - Chinese thesaurus dictionary builder
#[derive(Parser, Debug, Clone)]
#[command(name = "cilin")]
#[command(about = "Builds a Pleco-flavored Chinese thesaurus dictionary from flat relation lists")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct CilinArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl CilinArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build the markup dictionary from the source lists
    Build(BuildArgs),

    /// Show statistics for a previously written index snapshot
    Stats(StatsArgs),
}

/// Arguments for building the dictionary
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Synonym/related/independent cluster list
    #[arg(long, value_name = "FILE", default_value = "data/dict_synonym.txt")]
    pub synonym_file: PathBuf,

    /// Antonym pair list
    #[arg(long, value_name = "FILE", default_value = "data/dict_antonym.txt")]
    pub antonym_file: PathBuf,

    /// Negation-marker list
    #[arg(long, value_name = "FILE", default_value = "data/dict_negative.txt")]
    pub negation_file: PathBuf,

    /// Rendered markup output file; the density tier is appended to the stem
    #[arg(short, long, value_name = "FILE", default_value = "data/ChineseThesaurus-Pleco.txt")]
    pub output_file: PathBuf,

    /// Structured snapshot of the relation index
    #[arg(long, value_name = "FILE", default_value = "data/thesaurus_dict.json")]
    pub snapshot_file: PathBuf,

    /// Skip writing the snapshot
    #[arg(long)]
    pub no_snapshot: bool,

    /// Definition-lookup cache file, reused across runs
    #[arg(long, value_name = "FILE", default_value = "lookups.json")]
    pub cache_file: PathBuf,

    /// Glossary word list backing definition lookups (JSON)
    #[arg(long, value_name = "FILE")]
    pub glossary_file: Option<PathBuf>,

    /// Output density tier
    #[arg(short, long, default_value = "low")]
    pub density: Density,

    /// Fill the pinyin header field of each entry
    #[arg(long)]
    pub include_pinyin: bool,

    /// Maximum items per source list and rendered entries (debug aid)
    #[arg(short, long)]
    pub max_items: Option<usize>,

    /// Character threshold for the oversized group-line summary
    #[arg(long, default_value_t = 50)]
    pub big_line_threshold: usize,
}

/// Arguments for snapshot statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Path to an index snapshot written by `build`
    #[arg(value_name = "SNAPSHOT_FILE")]
    pub snapshot_file: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

impl BuildArgs {
    /// Output path with the density tier appended to the file stem, matching
    /// the `-low`/`-mid`/`-high` naming of the shipped dictionaries.
    pub fn density_output_file(&self) -> PathBuf {
        let density = match self.density {
            Density::Low => "low",
            Density::Mid => "mid",
            Density::High => "high",
        };
        let stem = self
            .output_file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let extension = self
            .output_file
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("txt");
        self.output_file
            .with_file_name(format!("{stem}-{density}.{extension}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_basic_build_command() {
        let args = CilinArgs::try_parse_from([
            "cilin",
            "build",
            "--density",
            "mid",
            "--include-pinyin",
            "--max-items",
            "100",
        ])
        .unwrap();

        if let Command::Build(build_args) = args.command {
            assert!(matches!(build_args.density, Density::Mid));
            assert!(build_args.include_pinyin);
            assert_eq!(build_args.max_items, Some(100));
            assert_eq!(build_args.cache_file, PathBuf::from("lookups.json"));
        } else {
            panic!("Expected Build command");
        }
    }

    #[test]
    fn test_stats_command() {
        let args =
            CilinArgs::try_parse_from(["cilin", "stats", "data/thesaurus_dict.json"]).unwrap();

        if let Command::Stats(stats_args) = args.command {
            assert_eq!(
                stats_args.snapshot_file,
                PathBuf::from("data/thesaurus_dict.json")
            );
        } else {
            panic!("Expected Stats command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        // Default verbosity
        let args = CilinArgs::try_parse_from(["cilin", "build"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        // Multiple verbose flags
        let args = CilinArgs::try_parse_from(["cilin", "-vv", "build"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        // Quiet flag
        let args = CilinArgs::try_parse_from(["cilin", "--quiet", "build"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args = CilinArgs::try_parse_from(["cilin", "--format", "json", "build"]).unwrap();
        assert!(matches!(args.output_format, OutputFormat::Json));
    }

    #[test]
    fn test_density_output_file() {
        let args = CilinArgs::try_parse_from(["cilin", "build", "--density", "high"]).unwrap();
        if let Command::Build(build_args) = args.command {
            assert_eq!(
                build_args.density_output_file(),
                PathBuf::from("data/ChineseThesaurus-Pleco-high.txt")
            );
        } else {
            panic!("Expected Build command");
        }
    }
}
