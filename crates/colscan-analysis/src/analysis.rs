//! Whole-table orchestration.
//!
//! Every column index `0..max_row_len` is analyzed independently. Columns
//! share nothing but the immutable table, so they run on the rayon pool by
//! default; the collected signals are always returned in index order.

use colscan_stats::regression::{LeastSquaresRegressor, Regressor};
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    AnalysisError,
    analyzer::{ColumnAnalyzer, ColumnSignal},
    cancel::CancellationToken,
    config::AnalysisConfig,
    table::ByteTable,
};

/// Signals for every column of a table, ordered by column index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableAnalysis {
    pub row_count: usize,
    pub columns: Vec<ColumnSignal>,
}

impl TableAnalysis {
    /// The `(scaled residual, uniformity score)` pairs in column order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(f64, f64)> {
        self.columns.iter().map(ColumnSignal::pair).collect()
    }
}

/// Runs a [`ColumnAnalyzer`] over every column of a table.
#[derive(Debug, Clone)]
pub struct TableAnalyzer<R> {
    columns: ColumnAnalyzer<R>,
    parallel: bool,
    cancel: CancellationToken,
}

impl TableAnalyzer<LeastSquaresRegressor> {
    #[must_use]
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(ColumnAnalyzer::from_config(config), config.parallel)
    }
}

impl<R> TableAnalyzer<R> {
    #[must_use]
    pub fn new(columns: ColumnAnalyzer<R>, parallel: bool) -> Self {
        Self {
            columns,
            parallel,
            cancel: CancellationToken::new(),
        }
    }

    /// Uses `token` to stop the analysis between columns.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    #[must_use]
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

impl<R> TableAnalyzer<R>
where
    R: Regressor + Sync,
{
    /// Analyzes every column of `table`.
    ///
    /// The result has exactly `table.max_row_len()` entries. Any column error
    /// aborts the whole run; when several columns fail, the error of the
    /// lowest column index is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// # use colscan_analysis::{analysis::TableAnalyzer, config::AnalysisConfig, table::ByteTable};
    /// let table = ByteTable::new(vec![vec![1, 2], vec![1], vec![1, 2, 3]]);
    /// let analysis = TableAnalyzer::from_config(&AnalysisConfig::default())
    ///     .analyze(&table)
    ///     .unwrap();
    /// assert_eq!(analysis.columns.len(), 3);
    /// assert_eq!(analysis.row_count, 3);
    /// ```
    pub fn analyze(&self, table: &ByteTable) -> Result<TableAnalysis, AnalysisError> {
        let width = table.max_row_len();
        tracing::info!(
            rows = table.row_count(),
            columns = width,
            parallel = self.parallel,
            max_degree = self.columns.max_degree(),
            "analyzing table"
        );

        let analyze_one = |index: usize| {
            if self.cancel.is_cancelled() {
                return Err(AnalysisError::Cancelled);
            }
            self.columns.analyze(table, index)
        };

        let columns = if self.parallel {
            (0..width)
                .into_par_iter()
                .map(analyze_one)
                .collect::<Vec<_>>()
                .into_iter()
                .collect::<Result<Vec<_>, _>>()
        } else {
            (0..width).map(analyze_one).collect::<Result<Vec<_>, _>>()
        };
        let columns = columns.inspect_err(|e| tracing::warn!("table analysis aborted: {e}"))?;

        tracing::info!(columns = columns.len(), "table analyzed");
        Ok(TableAnalysis {
            row_count: table.row_count(),
            columns,
        })
    }
}
