use std::collections::BTreeSet;

/// A set of 1-based column positions marked for deletion.
///
/// Position 0 is meaningless and never stored. Positions beyond a table's
/// column count are tolerated; they simply have no effect when the keep
/// list is computed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSelection {
    positions: BTreeSet<usize>,
}

impl ColumnSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_positions(positions: impl IntoIterator<Item = usize>) -> Self {
        Self {
            positions: positions.into_iter().filter(|&p| p >= 1).collect(),
        }
    }

    pub fn insert(&mut self, position: usize) {
        if position >= 1 {
            self.positions.insert(position);
        }
    }

    pub fn contains(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions to keep for a table of `column_count` columns, in original
    /// order. Kept count = `column_count - |selection ∩ [1, column_count]|`.
    pub fn keep_for(&self, column_count: usize) -> Vec<usize> {
        (1..=column_count)
            .filter(|p| !self.positions.contains(p))
            .collect()
    }
}
