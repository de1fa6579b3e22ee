//! CLI logic for the SchemaGraph analyzer.
//!
//! Reads schema sources, runs one analysis, reports scan diagnostics and
//! issues through the log, and writes the selected JSON document.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::{
    fs,
    io::{self, Write},
};

use log::{error, info, warn};

use schemagraph::{Analysis, Analyzer, EXAMPLE_SCHEMAS, SchemaGraphError, Session, Severity};

use error_adapter::{diagnostics_to_reportables, render};

/// Run the SchemaGraph CLI application
///
/// # Errors
///
/// Returns `SchemaGraphError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), SchemaGraphError> {
    info!(
        files = args.files.len(),
        example = args.example,
        output_path = args.output;
        "Analyzing schemas"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = if args.example {
        EXAMPLE_SCHEMAS.to_string()
    } else {
        read_sources(&args.files)?
    };

    let mut session = Session::new(Analyzer::new(app_config));
    let analysis = session.analyze(&source)?;

    report(analysis, &source);

    let document = match args.format {
        OutputFormat::Export => analysis.export_json()?,
        OutputFormat::Graph => analysis.graph_json()?,
        OutputFormat::Layout => analysis.layout_json()?,
    };

    if args.output == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(document.as_bytes())?;
        stdout.write_all(b"\n")?;
    } else {
        fs::write(&args.output, document)?;
        info!(output_file = args.output; "Analysis exported successfully");
    }

    Ok(())
}

/// Read every file and join them into one multi-unit source.
fn read_sources(files: &[String]) -> Result<String, SchemaGraphError> {
    let mut source = String::new();
    for path in files {
        let content = fs::read_to_string(path)?;
        source.push_str("// FILE: ");
        source.push_str(path);
        source.push('\n');
        source.push_str(&content);
        if !content.ends_with('\n') {
            source.push('\n');
        }
    }
    Ok(source)
}

fn report(analysis: &Analysis, source: &str) {
    for reportable in diagnostics_to_reportables(analysis.diagnostics(), source) {
        warn!("{}", render(&reportable));
    }

    for issue in analysis.issues() {
        match issue.severity() {
            Severity::Error => error!(schema = issue.subject_schema(); "{issue}"),
            Severity::Warning => warn!(schema = issue.subject_schema(); "{issue}"),
            Severity::Info => info!(schema = issue.subject_schema(); "{issue}"),
        }
    }

    let summary = analysis.summary();
    info!(
        schemas = summary.schemas,
        relationships = summary.relationships,
        errors = summary.errors,
        warnings = summary.warnings,
        infos = summary.infos;
        "Summary"
    );
}
