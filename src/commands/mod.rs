//! Command handlers for the CLI
//!
//! Each handler returns the text destined for stdout; the binary prints it.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::analysis::{analyze, Analysis, ProjectSnapshot};
use crate::cli::{OutputArgs, OutputFormat, ScanArgs, ScoreArgs};
use crate::config::Config;
use crate::error::{IpiError, Result};
use crate::indexing::scan_project;
use crate::report::{format_text_report, ReportOptions, SummaryDocument};
use crate::toon::{encode_json, encode_toon};

fn effective_config(args: &OutputArgs, root: Option<&Path>) -> Result<Config> {
    Ok(Config::discover(args.config.as_deref(), root)?.with_weight_overrides(
        args.alpha,
        args.beta,
        args.gamma,
        args.delta,
    ))
}

/// Run the scan command - parse a Java project and score its interfaces
pub fn run_scan(args: &ScanArgs) -> Result<String> {
    let mut config = effective_config(&args.output, Some(&args.path))?;
    if args.include_tests {
        config.scan.exclude_tests = false;
    }

    let snapshot = scan_project(&args.path, &config)?;
    let analysis = analyze(&snapshot, &config.weights);
    render(&analysis, &args.output)
}

/// Run the score command - score a JSON fact sheet
pub fn run_score(args: &ScoreArgs) -> Result<String> {
    if !args.facts.exists() {
        return Err(IpiError::FileNotFound {
            path: args.facts.display().to_string(),
        });
    }
    let config = effective_config(&args.output, None)?;

    let text = fs::read_to_string(&args.facts)?;
    let snapshot = ProjectSnapshot::from_fact_sheet_json(&text)?;
    let analysis = analyze(&snapshot, &config.weights);
    render(&analysis, &args.output)
}

/// Render an analysis in the requested format, writing the JSON summary
/// to `--output` when given
pub fn render(analysis: &Analysis, args: &OutputArgs) -> Result<String> {
    let doc = SummaryDocument::from_analysis(analysis);

    if let Some(ref path) = args.output {
        fs::write(path, encode_json(&doc)?)?;
        info!(path = %path.display(), "JSON exported");
    }

    match args.format {
        OutputFormat::Text => Ok(format_text_report(
            analysis,
            &ReportOptions { top: args.top },
        )),
        OutputFormat::Json => encode_json(&doc),
        OutputFormat::Toon => encode_toon(&doc),
    }
}
