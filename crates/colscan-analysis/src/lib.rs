//! Column analysis of ragged byte tables.
//!
//! A table holds one byte row per input line. For every byte position the
//! analyzer reads the column of bytes across rows and reports two signals:
//!
//! - **scaled residual**: how well the longest gap-free stretch of the column
//!   fits a low-degree polynomial, inflated when the stretch covers only part
//!   of the table. Fixed fields and counters score near zero.
//! - **uniformity score**: a variance-derived spread of the column's 256-bin
//!   byte histogram. Concentrated columns score high, evenly spread ones low.
//!
//! # Pipeline
//!
//! 1. **Ingest** ([`ingest::decode_text`]): decode text lines into a [`table::ByteTable`]
//! 2. **Extract** ([`column::Column`]): gapped and entry forms of one position
//! 3. **Find run** ([`run::Run::find_longest`]): longest gap-free stretch, earliest on ties
//! 4. **Count** ([`frequency::FrequencyTable`]): per-byte histogram
//! 5. **Score** ([`analyzer::ColumnAnalyzer`], [`uniformity::uniformity_score`])
//! 6. **Orchestrate** ([`analysis::TableAnalyzer`]): all columns, in parallel, in order
//!
//! # Examples
//!
//! ```
//! use colscan_analysis::{analysis::TableAnalyzer, config::AnalysisConfig, ingest};
//! use colscan_encoding::EncodingScheme;
//!
//! let table = ingest::decode_text("0100ff\n0101ee\n0102dd\n", EncodingScheme::AsciiHex)?;
//! let analysis = TableAnalyzer::from_config(&AnalysisConfig::default()).analyze(&table)?;
//!
//! let pairs = analysis.pairs();
//! assert_eq!(pairs.len(), 3);
//! // constant column and counter column both fit exactly
//! assert_eq!(pairs[0].0, 0.0);
//! assert_eq!(pairs[1].0, 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use colscan_stats::regression::RegressionError;

pub mod analysis;
pub mod analyzer;
pub mod cancel;
pub mod column;
pub mod config;
pub mod frequency;
pub mod ingest;
pub mod run;
pub mod table;
pub mod uniformity;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("column {index} has no bytes to analyze")]
    DegenerateColumn { index: usize },
    #[display("polynomial fit failed for column {index}")]
    Regression {
        index: usize,
        source: RegressionError,
    },
    #[display("analysis cancelled")]
    Cancelled,
}
