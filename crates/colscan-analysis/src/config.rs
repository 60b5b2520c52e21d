use serde::{Deserialize, Serialize};

/// Tunable parameters of a table analysis.
///
/// Missing fields take their defaults when deserialized, so a configuration
/// file only needs to name what it changes:
///
/// ```json
/// { "max_degree": 2 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Highest polynomial degree the regressor may choose per column.
    pub max_degree: usize,
    /// Analyze columns concurrently.
    pub parallel: bool,
}

impl AnalysisConfig {
    pub const DEFAULT_MAX_DEGREE: usize = 1;
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_degree: Self::DEFAULT_MAX_DEGREE,
            parallel: true,
        }
    }
}
