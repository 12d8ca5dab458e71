//! Comparison report types and their plain-text rendering.

use std::io::{self, Write};

use nullnet_core::{CentralityScores, EnsembleAverage, GlobalMetrics, NullModel};

/// Statistics of the observed network.
#[derive(Clone, Debug, PartialEq)]
pub struct ObservedSummary {
    /// Network name derived from the input file stem.
    pub name: String,
    /// Node count after cleanup.
    pub nodes: usize,
    /// Edge count after cleanup.
    pub edges: usize,
    /// Edge density `2E / (N (N - 1))`.
    pub density: f64,
    /// Normalised betweenness per node label.
    pub betweenness: CentralityScores<String>,
    /// Closeness per node label.
    pub closeness: CentralityScores<String>,
    /// Clustering, average path length and diameter.
    pub global: GlobalMetrics,
    /// Normalised degree histogram on `0..=max_degree`.
    pub degree_histogram: Vec<f64>,
}

/// Ensemble averages for one null model.
///
/// Generated node `i` is compared with the observed node at position `i` in
/// ascending label order.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelSummary {
    /// Model that produced the ensemble.
    pub model: NullModel,
    /// Trials whose statistics were all defined.
    pub completed: u32,
    /// Trials skipped because a statistic was undefined on the generated graph.
    pub skipped: u32,
    /// Mean betweenness per generated node; `None` when no trial completed.
    pub betweenness: Option<EnsembleAverage<usize>>,
    /// Mean closeness per generated node; `None` when no trial completed.
    pub closeness: Option<EnsembleAverage<usize>>,
    /// Mean global metrics keyed by `APL`, `CC` and `DIAM`.
    pub global: Option<EnsembleAverage<&'static str>>,
    /// Mean normalised degree histogram over every generated graph.
    pub degree_histogram: Vec<f64>,
}

/// Result of the `compare` command.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonReport {
    /// Trials generated per model.
    pub trials: u32,
    /// Seed used for the ensembles, if one was supplied.
    pub seed: Option<u64>,
    /// Observed network statistics.
    pub observed: ObservedSummary,
    /// One entry per requested model, in request order.
    pub models: Vec<ModelSummary>,
}

const GLOBAL_COLUMNS: [(&str, &str); 3] = [
    ("CC", "clustering"),
    ("APL", "avg path"),
    ("DIAM", "diameter"),
];

/// Renders `report` as aligned plain-text tables.
///
/// # Errors
/// Returns any error raised by `writer`.
pub fn render_report(report: &ComparisonReport, mut writer: impl Write) -> io::Result<()> {
    let observed = &report.observed;
    writeln!(
        writer,
        "network: {} ({} nodes, {} edges, density {:.4})",
        observed.name, observed.nodes, observed.edges, observed.density
    )?;
    match report.seed {
        Some(seed) => writeln!(writer, "trials per model: {} (seed {seed})", report.trials)?,
        None => writeln!(writer, "trials per model: {}", report.trials)?,
    }
    for model in &report.models {
        if model.skipped > 0 {
            writeln!(
                writer,
                "skipped {} of {} trials for {}",
                model.skipped, report.trials, model.model
            )?;
        }
    }

    writeln!(writer)?;
    render_global(report, &mut writer)?;
    writeln!(writer)?;
    writeln!(writer, "betweenness")?;
    render_centrality(
        report,
        &observed.betweenness,
        |model| model.betweenness.as_ref(),
        &mut writer,
    )?;
    writeln!(writer)?;
    writeln!(writer, "closeness")?;
    render_centrality(
        report,
        &observed.closeness,
        |model| model.closeness.as_ref(),
        &mut writer,
    )?;
    writeln!(writer)?;
    render_degrees(report, &mut writer)
}

fn render_global(report: &ComparisonReport, writer: &mut impl Write) -> io::Result<()> {
    write!(writer, "{:<32}", "model")?;
    for (_, title) in GLOBAL_COLUMNS {
        write!(writer, "{title:>12}")?;
    }
    writeln!(writer)?;

    write!(writer, "{:<32}", "observed")?;
    for (key, _) in GLOBAL_COLUMNS {
        write!(writer, "{:>12}", format_value(report.observed.global.get(key)))?;
    }
    writeln!(writer)?;

    for model in &report.models {
        write!(writer, "{:<32}", model.model.to_string())?;
        for (key, _) in GLOBAL_COLUMNS {
            let mean = model.global.as_ref().and_then(|average| average.get(&key));
            write!(writer, "{:>12}", format_value(mean))?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

fn render_centrality<'r>(
    report: &'r ComparisonReport,
    observed: &CentralityScores<String>,
    select: impl Fn(&'r ModelSummary) -> Option<&'r EnsembleAverage<usize>>,
    writer: &mut impl Write,
) -> io::Result<()> {
    write!(writer, "{:<20}{:>12}", "node", "observed")?;
    for model in &report.models {
        write!(writer, "{:>18}", model.model.name())?;
    }
    writeln!(writer)?;

    for (position, (label, value)) in observed.iter().enumerate() {
        write!(writer, "{label:<20}{:>12}", format_value(Some(value)))?;
        for model in &report.models {
            let mean = select(model).and_then(|average| average.get(&position));
            write!(writer, "{:>18}", format_value(mean))?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

fn render_degrees(report: &ComparisonReport, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "degree distribution")?;
    let bins = report
        .models
        .iter()
        .map(|model| model.degree_histogram.len())
        .chain([report.observed.degree_histogram.len()])
        .max()
        .unwrap_or_default();

    write!(writer, "{:<20}{:>12}", "degree", "observed")?;
    for model in &report.models {
        write!(writer, "{:>18}", model.model.name())?;
    }
    writeln!(writer)?;

    for bin in 0..bins {
        let observed = histogram_bin(&report.observed.degree_histogram, bin);
        write!(writer, "{bin:<20}{:>12}", format_value(Some(observed)))?;
        for model in &report.models {
            let share = histogram_bin(&model.degree_histogram, bin);
            write!(writer, "{:>18}", format_value(Some(share)))?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

// Bins past a histogram's end hold no degrees.
fn histogram_bin(histogram: &[f64], bin: usize) -> f64 {
    histogram.get(bin).copied().unwrap_or(0.0)
}

pub(super) fn format_value(value: Option<f64>) -> String {
    match value {
        None => "n/a".to_owned(),
        Some(value) if value.is_nan() => "NaN".to_owned(),
        Some(value) => format!("{value:.4}"),
    }
}
