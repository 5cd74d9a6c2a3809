use std::fmt;

use serde::Serialize;

/// An in-memory sheet: ordered headers plus positionally aligned rows.
///
/// Construction normalizes ragged input: every row is padded with empty
/// cells or truncated so it holds exactly `headers.len()` values. The
/// invariant holds for the lifetime of the table — projection preserves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Sheet name; carried into the output workbook.
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(name: impl Into<String>, headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Same table under a new sheet name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Project to the given 1-based column positions, in the given order.
    ///
    /// Drives both column deletion (keep = complement of the selection, in
    /// original order) and schema matching (keep = candidate positions of
    /// the common headers, in reference order). All-or-nothing: one
    /// out-of-range position fails the whole projection, no partial table
    /// is ever returned.
    pub fn project(&self, keep: &[usize]) -> Result<Table, TableError> {
        let width = self.headers.len();
        for &position in keep {
            if position == 0 || position > width {
                return Err(TableError::PositionOutOfRange {
                    position,
                    column_count: width,
                });
            }
        }

        let headers: Vec<String> = keep.iter().map(|&p| self.headers[p - 1].clone()).collect();
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| keep.iter().map(|&p| row[p - 1].clone()).collect())
            .collect();

        Ok(Table {
            name: self.name.clone(),
            headers,
            rows,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Projection position outside [1, column_count].
    PositionOutOfRange { position: usize, column_count: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositionOutOfRange {
                position,
                column_count,
            } => {
                write!(
                    f,
                    "column position {position} out of range (1..={column_count})"
                )
            }
        }
    }
}

impl std::error::Error for TableError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            "Sheet1",
            vec!["A".into(), "B".into()],
            vec![
                vec!["1".into(), "2".into()],
                vec!["3".into(), "4".into()],
            ],
        )
    }

    #[test]
    fn identity_projection() {
        let t = sample();
        let all: Vec<usize> = (1..=t.column_count()).collect();
        assert_eq!(t.project(&all).unwrap(), t);
    }

    #[test]
    fn delete_first_column() {
        let t = sample();
        let kept = t.project(&[2]).unwrap();
        assert_eq!(kept.headers, vec!["B"]);
        assert_eq!(kept.rows, vec![vec!["2".to_string()], vec!["4".to_string()]]);
    }

    #[test]
    fn reorder_columns() {
        let t = sample();
        let swapped = t.project(&[2, 1]).unwrap();
        assert_eq!(swapped.headers, vec!["B", "A"]);
        assert_eq!(swapped.rows[0], vec!["2".to_string(), "1".to_string()]);
    }

    #[test]
    fn out_of_range_position_fails_whole_projection() {
        let t = sample();
        let err = t.project(&[1, 3]).unwrap_err();
        assert_eq!(
            err,
            TableError::PositionOutOfRange {
                position: 3,
                column_count: 2
            }
        );
        // Position 0 is also invalid (positions are 1-based)
        assert!(t.project(&[0]).is_err());
    }

    #[test]
    fn ragged_rows_normalized() {
        let t = Table::new(
            "Sheet1",
            vec!["A".into(), "B".into(), "C".into()],
            vec![
                vec!["1".into()],
                vec!["1".into(), "2".into(), "3".into(), "4".into()],
            ],
        );
        assert_eq!(t.rows[0], vec!["1".to_string(), String::new(), String::new()]);
        assert_eq!(
            t.rows[1],
            vec!["1".to_string(), "2".to_string(), "3".to_string()]
        );
    }

    #[test]
    fn empty_keep_yields_zero_columns() {
        let t = sample();
        let empty = t.project(&[]).unwrap();
        assert_eq!(empty.column_count(), 0);
        assert_eq!(empty.row_count(), 2);
        assert!(empty.rows.iter().all(|r| r.is_empty()));
    }
}
