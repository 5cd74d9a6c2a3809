// Excel byte-stream import (xlsx, xlsm, xls, xlsb, ods) and export (xlsx only)
//
// Import reads the first sheet of the workbook into a Table: row 1 becomes
// the header list (with column-letter placeholders for empty cells), the
// rest become data rows. Export writes a single-sheet workbook carrying the
// table's name. Both are pure functions of their input.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use rust_xlsxwriter::Workbook as XlsxWorkbook;
use shears_table::header::derive_headers;
use shears_table::Table;

use crate::error::DecodeError;

/// Decode an uploaded spreadsheet byte stream into a Table.
///
/// First sheet only. Fails when the bytes are not a supported container,
/// the workbook has no sheets, or the sheet has zero columns.
pub fn decode(bytes: &[u8]) -> Result<Table, DecodeError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| DecodeError::Container(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(DecodeError::NoSheets)?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| DecodeError::Container(e.to_string()))?;

    range_to_table(&sheet_name, &range)
}

fn range_to_table(name: &str, range: &Range<Data>) -> Result<Table, DecodeError> {
    let (height, width) = range.get_size();
    if height == 0 || width == 0 {
        return Err(DecodeError::NoColumns);
    }

    let mut raw_rows = range.rows();
    // get_size() >= 1x1 guarantees a first row
    let first_row: Vec<String> = match raw_rows.next() {
        Some(row) => row.iter().map(cell_to_string).collect(),
        None => return Err(DecodeError::NoColumns),
    };
    let headers = derive_headers(&first_row);

    let rows: Vec<Vec<String>> = raw_rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(Table::new(name, headers, rows))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            // Format nicely: integers without decimals
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => format!("{}", n),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => format!("#{:?}", e),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Serialize a Table into a single-sheet xlsx byte stream.
///
/// Identical row count, header row first. The sheet name is the table
/// name after xlsx sanitization (invalid characters replaced, 31-char cap).
pub fn encode(table: &Table) -> Result<Vec<u8>, String> {
    let mut workbook = XlsxWorkbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name(sanitize_sheet_name(&table.name))
        .map_err(|e| format!("Failed to create sheet '{}': {}", table.name, e))?;

    for (col, header) in table.headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, header)
            .map_err(|e| format!("Failed to write header: {}", e))?;
    }
    for (row_idx, row) in table.rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            if !cell.is_empty() {
                worksheet
                    .write_string((row_idx + 1) as u32, col as u16, cell)
                    .map_err(|e| format!("Failed to write cell: {}", e))?;
            }
        }
    }

    workbook.save_to_buffer().map_err(|e| e.to_string())
}

/// Excel rejects sheet names over 31 characters or containing []:*?/\
fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(31)
        .collect();
    if cleaned.trim().is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned
    }
}
