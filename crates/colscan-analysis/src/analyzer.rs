//! Per-column signal computation.
//!
//! For a column the analyzer finds the longest gap-free run, fits a
//! polynomial of bounded degree through the run's `(row index, byte)` pairs,
//! and scales the fit's residual by how much of the table the run covers:
//!
//! ```text
//! residual        = round(sum of squared residuals, 2 decimals, ties to even)
//! multiplier      = run length / row count
//! scaled residual = residual / multiplier
//! ```
//!
//! A short run is therefore not rewarded for being easy to fit. The
//! uniformity score comes from [`uniformity_score`] over the column's
//! histogram.

use colscan_stats::regression::{LeastSquaresRegressor, Regressor};
use serde::Serialize;

use crate::{
    AnalysisError, column::Column, config::AnalysisConfig, run::Run, table::ByteTable,
    uniformity::uniformity_score,
};

/// Signals computed for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSignal {
    pub index: usize,
    /// Rounded residual divided by the fraction of rows the run covers.
    pub scaled_residual: f64,
    pub uniformity_score: f64,
    /// Rounded residual before scaling.
    pub residual: f64,
    /// Degree chosen by the regressor.
    pub degree: usize,
    pub run: Run,
    pub entry_count: usize,
}

impl ColumnSignal {
    /// The `(scaled residual, uniformity score)` pair.
    #[must_use]
    pub fn pair(&self) -> (f64, f64) {
        (self.scaled_residual, self.uniformity_score)
    }
}

/// Computes [`ColumnSignal`]s with a pluggable regressor.
#[derive(Debug, Clone)]
pub struct ColumnAnalyzer<R> {
    regressor: R,
    max_degree: usize,
}

impl Default for ColumnAnalyzer<LeastSquaresRegressor> {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl ColumnAnalyzer<LeastSquaresRegressor> {
    #[must_use]
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(LeastSquaresRegressor::default(), config.max_degree)
    }
}

impl<R> ColumnAnalyzer<R> {
    #[must_use]
    pub fn new(regressor: R, max_degree: usize) -> Self {
        Self {
            regressor,
            max_degree,
        }
    }

    #[must_use]
    pub fn regressor(&self) -> &R {
        &self.regressor
    }

    #[must_use]
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }
}

impl<R> ColumnAnalyzer<R>
where
    R: Regressor,
{
    /// Analyzes the column at `index` of `table`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use colscan_analysis::{analyzer::ColumnAnalyzer, table::ByteTable};
    /// let table = ByteTable::new(vec![vec![1, 1], vec![1, 1], vec![1, 1]]);
    /// let signal = ColumnAnalyzer::default().analyze(&table, 0).unwrap();
    /// assert_eq!(signal.scaled_residual, 0.0);
    /// assert!((signal.uniformity_score - 0.9765625).abs() < 1e-12);
    /// ```
    pub fn analyze(&self, table: &ByteTable, index: usize) -> Result<ColumnSignal, AnalysisError> {
        self.analyze_column(&table.column(index))
    }

    /// Analyzes an already extracted column.
    ///
    /// Fails with [`AnalysisError::DegenerateColumn`] when the column has no
    /// entries; the regressor is not called in that case.
    #[expect(clippy::cast_precision_loss)]
    pub fn analyze_column(&self, column: &Column) -> Result<ColumnSignal, AnalysisError> {
        let index = column.index();
        let entry_count = column.entry_count();
        let run = column.longest_run();
        if entry_count == 0 || run.is_empty() {
            return Err(AnalysisError::DegenerateColumn { index });
        }

        let (x, y): (Vec<f64>, Vec<f64>) = column.gapped()[run.range()]
            .iter()
            .zip(run.range())
            .filter_map(|(cell, row)| cell.map(|byte| (row as f64, f64::from(byte))))
            .unzip();
        let fit = self
            .regressor
            .fit(&x, &y, self.max_degree)
            .map_err(|source| AnalysisError::Regression { index, source })?;

        let residual = round_to_hundredths(fit.residual);
        let multiplier = run.len() as f64 / column.row_count() as f64;
        let scaled_residual = residual / multiplier;

        let uniformity_score = uniformity_score(&column.frequencies(), entry_count)
            .ok_or(AnalysisError::DegenerateColumn { index })?;

        tracing::debug!(
            index,
            entry_count,
            run_start = run.start,
            run_len = run.len(),
            degree = fit.degree,
            scaled_residual,
            uniformity_score,
            "column analyzed"
        );

        Ok(ColumnSignal {
            index,
            scaled_residual,
            uniformity_score,
            residual,
            degree: fit.degree,
            run,
            entry_count,
        })
    }
}

/// Exact halves go to the even hundredth.
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
