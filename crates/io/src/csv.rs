// CSV/TSV byte-stream decode/encode

use shears_table::header::derive_headers;
use shears_table::Table;

use crate::error::DecodeError;

/// Decode CSV bytes into a Table, sniffing the delimiter.
///
/// Row 1 becomes the header list (placeholders for empty cells); ragged
/// rows are normalized to the widest record seen. CSV carries no sheet
/// name, so the table is named `Sheet1` — callers usually rename it after
/// the source file.
pub fn decode(bytes: &[u8]) -> Result<Table, DecodeError> {
    let content = bytes_to_utf8(bytes);
    let delimiter = sniff_delimiter(&content);
    decode_from_string(&content, delimiter)
}

pub fn decode_with_delimiter(bytes: &[u8], delimiter: u8) -> Result<Table, DecodeError> {
    let content = bytes_to_utf8(bytes);
    decode_from_string(&content, delimiter)
}

/// Detect the most likely field delimiter by checking consistency across the
/// first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line.
/// The delimiter that produces the most consistent field count (>1 field) wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Score: (number of lines with same field count as line 1) * field_count
        // Higher field count breaks ties — more columns = more likely real delimiter
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
fn bytes_to_utf8(bytes: &[u8]) -> String {
    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes.to_vec()) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}

fn decode_from_string(content: &str, delimiter: u8) -> Result<Table, DecodeError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records: Vec<Vec<String>> = Vec::new();
    let mut width = 0usize;
    for result in reader.records() {
        let record = result.map_err(|e| DecodeError::Csv(e.to_string()))?;
        width = width.max(record.len());
        records.push(record.iter().map(str::to_string).collect());
    }

    if records.is_empty() || width == 0 {
        return Err(DecodeError::NoColumns);
    }

    // Column count is the widest record; a short header row still names
    // every column (via placeholders).
    let mut first_row = records.remove(0);
    first_row.resize(width, String::new());
    let headers = derive_headers(&first_row);

    Ok(Table::new("Sheet1", headers, records))
}

pub fn encode(table: &Table) -> Result<Vec<u8>, String> {
    encode_with_delimiter(table, b',')
}

pub fn encode_tsv(table: &Table) -> Result<Vec<u8>, String> {
    encode_with_delimiter(table, b'\t')
}

pub fn encode_with_delimiter(table: &Table, delimiter: u8) -> Result<Vec<u8>, String> {
    if table.column_count() == 0 {
        return Err("cannot encode a table with no columns as CSV".to_string());
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer
        .write_record(&table.headers)
        .map_err(|e| e.to_string())?;
    for row in &table.rows {
        writer.write_record(row).map_err(|e| e.to_string())?;
    }

    writer.into_inner().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniff_semicolon_delimiter() {
        let content = "Name;Age;City\nAlice;30;Paris\nBob;25;London\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn sniff_comma_delimiter() {
        let content = "Name,Age,City\nAlice,30,Paris\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn sniff_tab_delimiter() {
        let content = "Name\tAge\nAlice\t30\n";
        assert_eq!(sniff_delimiter(content), b'\t');
    }

    #[test]
    fn sniff_semicolon_with_commas_in_values() {
        let content =
            "Name;Address;City\n\"Doe, Jane\";\"123 Main St, Apt 4\";Paris\nBob;\"456 Elm\";London\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn decode_semicolon_csv() {
        let table = decode(b"Name;Age\nAlice;30\nBob;25\n").unwrap();
        assert_eq!(table.headers, vec!["Name", "Age"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["Alice".to_string(), "30".to_string()],
                vec!["Bob".to_string(), "25".to_string()],
            ]
        );
    }

    #[test]
    fn decode_empty_header_cell_gets_placeholder() {
        let table = decode(b"ID,,City\n1,x,Paris\n").unwrap();
        assert_eq!(table.headers, vec!["ID", "(empty B)", "City"]);
    }

    #[test]
    fn decode_ragged_rows_normalized() {
        // Data row wider than the header row: extra columns get placeholder
        // names; short rows are padded.
        let table = decode(b"A,B\n1,2,3\n4\n").unwrap();
        assert_eq!(table.headers, vec!["A", "B", "(empty C)"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["1".to_string(), "2".to_string(), "3".to_string()],
                vec!["4".to_string(), String::new(), String::new()],
            ]
        );
    }

    #[test]
    fn decode_empty_input_fails() {
        assert_eq!(decode(b"").unwrap_err(), DecodeError::NoColumns);
    }

    #[test]
    fn decode_windows_1252_fallback() {
        // "Café" in Windows-1252: é = 0xE9, invalid as UTF-8
        let bytes = b"Name,Drink\nAlice,Caf\xe9\n";
        let table = decode(bytes).unwrap();
        assert_eq!(table.rows[0][1], "Café");
    }

    #[test]
    fn encode_writes_header_then_rows() {
        let table = Table::new(
            "Sheet1",
            vec!["A".into(), "B".into()],
            vec![vec!["1".into(), "2".into()]],
        );
        let bytes = encode(&table).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "A,B\n1,2\n");
    }

    #[test]
    fn encode_zero_columns_rejected() {
        let table = Table::new("Sheet1", vec![], vec![]);
        assert!(encode(&table).is_err());
    }
}
