use std::ops::Range;

use serde::Serialize;

/// Contiguous gap-free range `[start, stop)` of a column's gapped form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Run {
    pub start: usize,
    pub stop: usize,
}

impl Run {
    pub const EMPTY: Self = Self { start: 0, stop: 0 };

    #[must_use]
    pub const fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.stop - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.stop
    }

    /// Finds the longest gap-free run.
    ///
    /// Candidates only replace the best run when strictly longer, so among
    /// runs of equal length the earliest one wins. A column made only of gaps
    /// yields the empty run at index 0.
    ///
    /// # Examples
    ///
    /// ```
    /// # use colscan_analysis::run::Run;
    /// let cells = [Some(6), None, Some(6)];
    /// assert_eq!(Run::find_longest(&cells), Run::new(0, 1));
    /// ```
    #[must_use]
    pub fn find_longest(cells: &[Option<u8>]) -> Self {
        let mut best = Self::EMPTY;
        let mut start = 0;
        for (i, cell) in cells.iter().enumerate() {
            if cell.is_none() {
                best = best.keep_longer(Self::new(start, i));
                start = i + 1;
            }
        }
        best.keep_longer(Self::new(start, cells.len()))
    }

    fn keep_longer(self, candidate: Self) -> Self {
        if candidate.len() > self.len() {
            candidate
        } else {
            self
        }
    }
}
