//! Ranking, summary statistics and the human-readable report

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::analysis::Analysis;
use crate::schema::{InterfaceScore, IpiRecord, Severity};
use crate::scoring::{HIGH_THRESHOLD, MEDIUM_THRESHOLD};
use crate::utils::fit_column;

/// How many HIGH interfaces the severity view lists
pub const TOP_HIGH_LIMIT: usize = 5;

/// Rank scores by descending IPI. Equal scores keep their input order.
pub fn rank(scores: &[InterfaceScore]) -> Vec<&InterfaceScore> {
    let mut ranked: Vec<&InterfaceScore> = scores.iter().collect();
    // sort_by_key is stable
    ranked.sort_by_key(|s| Reverse(OrderedFloat(s.ipi)));
    ranked
}

/// Aggregate statistics over all scored interfaces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub mean_ipi: f64,
    pub max_ipi: f64,
    pub min_ipi: f64,
    pub single_impl_count: usize,
    pub single_impl_pct: f64,
    pub zero_usage_count: usize,
    pub zero_usage_pct: f64,
}

impl SummaryStats {
    /// `None` when there is nothing to summarize
    pub fn compute(scores: &[InterfaceScore]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        let n = scores.len() as f64;
        let sum: f64 = scores.iter().map(|s| s.ipi).sum();
        let max_ipi = scores.iter().map(|s| s.ipi).fold(f64::MIN, f64::max);
        let min_ipi = scores.iter().map(|s| s.ipi).fold(f64::MAX, f64::min);
        let single_impl_count = scores.iter().filter(|s| s.implementations == 1).count();
        let zero_usage_count = scores.iter().filter(|s| s.usages == 0).count();

        Some(Self {
            mean_ipi: sum / n,
            max_ipi,
            min_ipi,
            single_impl_count,
            single_impl_pct: 100.0 * single_impl_count as f64 / n,
            zero_usage_count,
            zero_usage_pct: 100.0 * zero_usage_count as f64 / n,
        })
    }
}

/// Severity band counts and the worst HIGH offenders
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeverityView {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Up to five HIGH interfaces, highest IPI first
    pub top_high: Vec<(String, f64)>,
}

impl SeverityView {
    pub fn compute(scores: &[InterfaceScore]) -> Self {
        let mut view = Self::default();
        for score in scores {
            match score.severity {
                Severity::High => view.high += 1,
                Severity::Medium => view.medium += 1,
                Severity::Low => view.low += 1,
            }
        }
        view.top_high = rank(scores)
            .into_iter()
            .filter(|s| s.severity == Severity::High)
            .take(TOP_HIGH_LIMIT)
            .map(|s| (s.interface.clone(), s.ipi))
            .collect();
        view
    }
}

/// Weight block of the summary document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightsRecord {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub delta: f64,
}

/// The structured summary written as JSON or TOON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    pub total_classes: usize,
    pub total_interfaces: usize,
    pub max_call_depth: usize,
    pub weights: WeightsRecord,
    /// Ranked, display-rounded records
    pub results: Vec<IpiRecord>,
}

impl SummaryDocument {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let w = &analysis.weights;
        Self {
            project: analysis.project.clone(),
            total_classes: analysis.total_types,
            total_interfaces: analysis.total_interfaces,
            max_call_depth: analysis.max_call_depth,
            weights: WeightsRecord {
                alpha: w.alpha,
                beta: w.beta,
                gamma: w.gamma,
                delta: w.delta,
            },
            results: rank(&analysis.scores)
                .into_iter()
                .map(IpiRecord::from)
                .collect(),
        }
    }
}

/// Options for the text report
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Limit the ranked table to this many rows; statistics still cover all
    pub top: Option<usize>,
}

const RULE: &str = "──────────────────────────────────────────────────────────────────────";

fn section(output: &mut String, title: &str) {
    let dashes = RULE.chars().count().saturating_sub(title.chars().count() + 4);
    output.push_str(&format!("── {} {}\n", title, "─".repeat(dashes)));
}

/// Format an analysis as the human-readable text report
pub fn format_text_report(analysis: &Analysis, options: &ReportOptions) -> String {
    let mut output = String::new();

    output.push_str("╔════════════════════════════════════════════════════════════════════╗\n");
    output.push_str("║                INTERFACE POISONING ANALYSIS REPORT                 ║\n");
    output.push_str("╚════════════════════════════════════════════════════════════════════╝\n\n");

    section(&mut output, "OVERVIEW");
    if let Some(ref project) = analysis.project {
        output.push_str(&format!("  Project:           {}\n", project));
    }
    output.push_str(&format!("  Total Classes:     {:>6}\n", analysis.total_types));
    output.push_str(&format!("  Total Interfaces:  {:>6}\n", analysis.total_interfaces));
    output.push_str(&format!("  Max Call Depth:    {:>6}\n", analysis.max_call_depth));
    if analysis.skipped_units > 0 {
        output.push_str(&format!("  Skipped Units:     {:>6}\n", analysis.skipped_units));
    }
    output.push('\n');

    let w = &analysis.weights;
    section(&mut output, "IPI WEIGHTS");
    output.push_str(&format!("  α (SIR): {}\n", w.alpha));
    output.push_str(&format!("  β (UUR): {}\n", w.beta));
    output.push_str(&format!("  γ (UMR): {}\n", w.gamma));
    output.push_str(&format!("  δ (NCD): {}\n", w.delta));
    output.push('\n');

    section(&mut output, "INTERFACE POISONING INDEX (IPI) RESULTS");
    output.push_str(&format!(
        "  {:<30} {:>4} {:>6} {:>4} {:>6} {:>6} {:>4} {:>6} {:>7}\n",
        "Interface", "IC", "SIR", "IU", "UUR", "UMR", "CD", "NCD", "IPI"
    ));
    output.push_str(&format!("  {}\n", "─".repeat(68)));

    let ranked = rank(&analysis.scores);
    let rows = options.top.unwrap_or(ranked.len());
    for s in ranked.iter().take(rows) {
        output.push_str(&format!(
            "  {:<30} {:>4} {:>6.3} {:>4} {:>6.3} {:>6.3} {:>4} {:>6.3} {:>7.3}\n",
            fit_column(&s.interface, 30),
            s.implementations,
            s.sir,
            s.usages,
            s.uur,
            s.umr,
            s.call_depth,
            s.ncd,
            s.ipi
        ));
    }
    if rows < ranked.len() {
        output.push_str(&format!("  ... {} more\n", ranked.len() - rows));
    }
    output.push('\n');

    if let Some(stats) = SummaryStats::compute(&analysis.scores) {
        section(&mut output, "SUMMARY STATISTICS");
        output.push_str(&format!("  Average IPI: {:.3}\n", stats.mean_ipi));
        output.push_str(&format!("  Max IPI: {:.3}\n", stats.max_ipi));
        output.push_str(&format!("  Min IPI: {:.3}\n", stats.min_ipi));
        output.push_str(&format!(
            "  Single-Implementation Interfaces: {} ({:.1}%)\n",
            stats.single_impl_count, stats.single_impl_pct
        ));
        output.push_str(&format!(
            "  Zero-Usage Interfaces: {} ({:.1}%)\n",
            stats.zero_usage_count, stats.zero_usage_pct
        ));
        output.push('\n');
    }

    section(&mut output, "POISONING LEVELS");
    output.push_str(&format!(
        "  HIGH (IPI > {}):   Immediate refactoring recommended\n",
        HIGH_THRESHOLD
    ));
    output.push_str(&format!(
        "  MEDIUM ({}-{}):   Review and consider simplification\n",
        MEDIUM_THRESHOLD, HIGH_THRESHOLD
    ));
    output.push_str(&format!(
        "  LOW (IPI < {}):    Acceptable complexity level\n",
        MEDIUM_THRESHOLD
    ));
    output.push('\n');

    let view = SeverityView::compute(&analysis.scores);
    output.push_str(&format!("  HIGH:   {} interfaces\n", view.high));
    output.push_str(&format!("  MEDIUM: {} interfaces\n", view.medium));
    output.push_str(&format!("  LOW:    {} interfaces\n", view.low));

    if !view.top_high.is_empty() {
        output.push_str("\n  High-risk interfaces:\n");
        for (name, ipi) in &view.top_high {
            output.push_str(&format!("    - {} (IPI: {:.3})\n", name, ipi));
        }
    }

    output
}
