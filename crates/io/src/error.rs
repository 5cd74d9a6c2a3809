use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Bytes are not a valid spreadsheet container.
    Container(String),
    /// Workbook opened but holds no sheets.
    NoSheets,
    /// First sheet has zero columns (or no data at all).
    NoColumns,
    /// CSV record-level parse error.
    Csv(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container(msg) => write!(f, "not a valid spreadsheet: {msg}"),
            Self::NoSheets => write!(f, "workbook has no sheets"),
            Self::NoColumns => write!(f, "sheet has no columns"),
            Self::Csv(msg) => write!(f, "CSV parse error: {msg}"),
        }
    }
}

impl std::error::Error for DecodeError {}
