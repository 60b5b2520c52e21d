use crate::{frequency::FrequencyTable, run::Run};

/// One byte position read across every row of a table.
///
/// The gapped form has exactly one cell per row, `None` where the row is too
/// short to reach the position. The entry form is the same sequence with the
/// gaps removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    index: usize,
    cells: Vec<Option<u8>>,
}

impl Column {
    #[must_use]
    pub fn extract(rows: &[Vec<u8>], index: usize) -> Self {
        let cells = rows.iter().map(|row| row.get(index).copied()).collect();
        Self { index, cells }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Gapped form: one cell per row.
    #[must_use]
    pub fn gapped(&self) -> &[Option<u8>] {
        &self.cells
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    /// Entry form: the bytes present in this column, in row order.
    pub fn entries(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().flatten().copied()
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    #[must_use]
    pub fn frequencies(&self) -> FrequencyTable {
        self.entries().collect()
    }

    #[must_use]
    pub fn longest_run(&self) -> Run {
        Run::find_longest(&self.cells)
    }
}
