//! Command-line argument definitions for the SchemaGraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the schema sources, the output document
//! and its destination, configuration file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

/// Command-line arguments for the SchemaGraph analyzer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Schema source files, analyzed together as one project
    #[arg(required_unless_present = "example")]
    pub files: Vec<String>,

    /// Analyze the built-in example schemas instead of files
    #[arg(long, conflicts_with = "files")]
    pub example: bool,

    /// Path to the output JSON file, or `-` for standard output
    #[arg(short, long, default_value = "schema-analysis.json")]
    pub output: String,

    /// Document to write
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Export)]
    pub format: OutputFormat,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// The JSON document written by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Timestamped report with summary, schemas, relationships and issues
    Export,
    /// Schemas, relationships and issues with full detail
    Graph,
    /// Hierarchical layout nodes and styled edges
    Layout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["schemagraph", "models.js"]).unwrap();
        assert_eq!(args.files, ["models.js"]);
        assert!(!args.example);
        assert_eq!(args.output, "schema-analysis.json");
        assert_eq!(args.format, OutputFormat::Export);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_example_needs_no_files() {
        let args =
            Args::try_parse_from(["schemagraph", "--example", "--format", "layout", "-o", "-"])
                .unwrap();
        assert!(args.example);
        assert_eq!(args.format, OutputFormat::Layout);
        assert_eq!(args.output, "-");
    }

    #[test]
    fn test_files_or_example_required() {
        assert!(Args::try_parse_from(["schemagraph"]).is_err());
        assert!(Args::try_parse_from(["schemagraph", "--example", "a.js"]).is_err());
    }
}
