use crate::column::Column;

/// Ragged table of byte rows.
///
/// Rows keep their decoded lengths; positions past the end of a short row
/// read as gaps when a [`Column`] is extracted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteTable {
    rows: Vec<Vec<u8>>,
}

impl ByteTable {
    #[must_use]
    pub fn new(rows: Vec<Vec<u8>>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Length of the longest row, which is also the number of columns.
    #[must_use]
    pub fn max_row_len(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Extracts the column at `index`.
    ///
    /// Never fails: an index beyond every row yields an all-gap column.
    #[must_use]
    pub fn column(&self, index: usize) -> Column {
        Column::extract(&self.rows, index)
    }
}

impl From<Vec<Vec<u8>>> for ByteTable {
    fn from(rows: Vec<Vec<u8>>) -> Self {
        Self::new(rows)
    }
}

impl FromIterator<Vec<u8>> for ByteTable {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let table = ByteTable::new(vec![vec![5, 6], vec![5], vec![5, 6, 7]]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.max_row_len(), 3);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_empty_table() {
        let table = ByteTable::default();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.max_row_len(), 0);
        assert!(table.column(0).gapped().is_empty());
    }

    #[test]
    fn test_column_does_not_mutate_table() {
        let table = [vec![1, 2], vec![3]].into_iter().collect::<ByteTable>();
        let before = table.clone();
        let _ = table.column(1);
        let _ = table.column(9);
        assert_eq!(table, before);
    }
}
