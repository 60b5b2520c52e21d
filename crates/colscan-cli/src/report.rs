//! Analysis report in text and JSON form
//!
//! The text form is a fixed-width table, one row per column, followed by a
//! summary of both signals over all columns. The JSON form carries the same
//! data plus the settings used and a generation timestamp.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use colscan_analysis::{analysis::TableAnalysis, analyzer::ColumnSignal, config::AnalysisConfig};
use colscan_encoding::EncodingScheme;
use colscan_stats::variance::OnlineVariance;
use serde::Serialize;

// index(6) + residual(12) + uniformity(12) + degree(7) + run(15) + entries(8) + spaces(5)
const TABLE_WIDTH: usize = 65;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Report<'a> {
    pub source: String,
    pub encoding: &'static str,
    pub generated_at: DateTime<Utc>,
    pub config: AnalysisConfig,
    pub row_count: usize,
    pub columns: &'a [ColumnSignal],
    pub summary: Summary,
}

/// Distribution of both signals over all columns
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct Summary {
    pub residual: SignalSummary,
    pub uniformity: SignalSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct SignalSummary {
    pub mean: Option<f64>,
    /// Sample standard deviation; absent with fewer than two columns.
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl SignalSummary {
    fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let acc = values.into_iter().collect::<OnlineVariance>();
        Self {
            mean: acc.mean(),
            std_dev: acc.sample_std_dev(),
            min: acc.min(),
            max: acc.max(),
        }
    }
}

impl Summary {
    fn from_columns(columns: &[ColumnSignal]) -> Self {
        Self {
            residual: SignalSummary::from_values(columns.iter().map(|c| c.scaled_residual)),
            uniformity: SignalSummary::from_values(columns.iter().map(|c| c.uniformity_score)),
        }
    }
}

impl<'a> Report<'a> {
    pub fn new(
        source: String,
        scheme: EncodingScheme,
        config: AnalysisConfig,
        analysis: &'a TableAnalysis,
    ) -> Self {
        Self {
            source,
            encoding: scheme.name(),
            generated_at: Utc::now(),
            config,
            row_count: analysis.row_count,
            columns: &analysis.columns,
            summary: Summary::from_columns(&analysis.columns),
        }
    }

    /// Write the fixed-width text form
    pub fn write_text<W>(&self, out: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        writeln!(
            out,
            "Source: {} ({}), {} rows, {} columns",
            self.source,
            self.encoding,
            self.row_count,
            self.columns.len()
        )?;
        writeln!(out)?;

        if self.columns.is_empty() {
            writeln!(out, "  No columns to analyze.")?;
            return Ok(());
        }

        writeln!(
            out,
            "  {:>6} {:>12} {:>12} {:>7} {:>15} {:>8}",
            "Column", "Residual", "Uniformity", "Degree", "Run", "Entries",
        )?;
        writeln!(out, "  {}", "-".repeat(TABLE_WIDTH))?;
        for column in self.columns {
            writeln!(
                out,
                "  {:>6} {:>12.2} {:>12.2} {:>7} {:>15} {:>8}",
                column.index,
                column.scaled_residual,
                column.uniformity_score,
                column.degree,
                format!("{}..{}", column.run.start, column.run.stop),
                column.entry_count,
            )?;
        }
        writeln!(out)?;

        writeln!(
            out,
            "  {:<12} {:>12} {:>12} {:>12} {:>12}",
            "Signal", "Mean", "StdDev", "Min", "Max"
        )?;
        writeln!(out, "  {}", "-".repeat(64))?;
        write_summary_row(out, "Residual", &self.summary.residual)?;
        write_summary_row(out, "Uniformity", &self.summary.uniformity)?;
        Ok(())
    }
}

fn write_summary_row<W>(out: &mut W, label: &str, summary: &SignalSummary) -> io::Result<()>
where
    W: Write,
{
    let cell = |value: Option<f64>| value.map_or("N/A".to_string(), |v| format!("{v:.2}"));
    writeln!(
        out,
        "  {:<12} {:>12} {:>12} {:>12} {:>12}",
        label,
        cell(summary.mean),
        cell(summary.std_dev),
        cell(summary.min),
        cell(summary.max),
    )
}

#[cfg(test)]
mod tests {
    use colscan_analysis::{analysis::TableAnalyzer, table::ByteTable};

    use super::*;

    fn analysis() -> TableAnalysis {
        let table = ByteTable::new(vec![vec![1, 0], vec![1, 1], vec![1, 2], vec![1]]);
        TableAnalyzer::from_config(&AnalysisConfig::default())
            .analyze(&table)
            .unwrap()
    }

    #[test]
    fn test_summary() {
        let analysis = analysis();
        let report = Report::new(
            "input.txt".to_owned(),
            EncodingScheme::Plain,
            AnalysisConfig::default(),
            &analysis,
        );
        let summary = report.summary;
        assert_eq!(summary.residual.min, Some(0.0));
        assert_eq!(summary.residual.max, Some(0.0));
        assert!(summary.uniformity.mean.unwrap() > 0.0);
        assert!(summary.uniformity.std_dev.is_some());
    }

    #[test]
    fn test_summary_of_single_column_has_no_std_dev() {
        let summary = SignalSummary::from_values([2.5]);
        assert_eq!(summary.mean, Some(2.5));
        assert_eq!(summary.std_dev, None);
    }

    #[test]
    fn test_text_lists_every_column() {
        let analysis = analysis();
        let report = Report::new(
            "input.txt".to_owned(),
            EncodingScheme::AsciiHex,
            AnalysisConfig::default(),
            &analysis,
        );
        let mut out = Vec::new();
        report.write_text(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Source: input.txt (asciihex), 4 rows, 2 columns"));
        assert!(text.contains("0..4"));
        assert!(text.contains("0..3"));
        assert!(text.contains("Uniformity"));
    }

    #[test]
    fn test_text_without_columns() {
        let analysis = TableAnalysis {
            row_count: 0,
            columns: Vec::new(),
        };
        let report = Report::new(
            "empty.txt".to_owned(),
            EncodingScheme::Plain,
            AnalysisConfig::default(),
            &analysis,
        );
        let mut out = Vec::new();
        report.write_text(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("No columns"));
    }

    #[test]
    fn test_json_fields() {
        let analysis = analysis();
        let report = Report::new(
            "input.txt".to_owned(),
            EncodingScheme::Base64,
            AnalysisConfig::default(),
            &analysis,
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["encoding"], "base64");
        assert_eq!(value["row_count"], 4);
        assert_eq!(value["config"]["max_degree"], 1);
        assert_eq!(value["columns"].as_array().unwrap().len(), 2);
        assert_eq!(value["columns"][1]["run"]["stop"], 3);
        assert!(value["generated_at"].is_string());
    }
}
