// Header derivation: row-1 cell value, or a column-letter placeholder.

/// Spreadsheet column letter for a 1-based position: 1 → A, 26 → Z, 27 → AA.
pub fn column_letter(position: usize) -> String {
    debug_assert!(position >= 1, "column positions are 1-based");
    let mut n = position;
    let mut letters: Vec<char> = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Header label for a raw row-1 cell at a 1-based position.
///
/// The trimmed cell value when non-empty, otherwise a placeholder naming
/// the column letter, e.g. `(empty C)`. Every column ends up with a
/// non-empty label that can be referenced by name.
pub fn header_label(raw: &str, position: usize) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        format!("(empty {})", column_letter(position))
    } else {
        trimmed.to_string()
    }
}

/// Derive the full header list from the first row of a sheet.
pub fn derive_headers(first_row: &[String]) -> Vec<String> {
    first_row
        .iter()
        .enumerate()
        .map(|(i, cell)| header_label(cell, i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_letters() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(2), "B");
        assert_eq!(column_letter(26), "Z");
    }

    #[test]
    fn double_letters() {
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(28), "AB");
        assert_eq!(column_letter(52), "AZ");
        assert_eq!(column_letter(53), "BA");
        assert_eq!(column_letter(702), "ZZ");
        assert_eq!(column_letter(703), "AAA");
    }

    #[test]
    fn label_keeps_value() {
        assert_eq!(header_label("Name", 1), "Name");
        assert_eq!(header_label("  Age  ", 2), "Age");
    }

    #[test]
    fn label_placeholder_for_empty() {
        assert_eq!(header_label("", 3), "(empty C)");
        assert_eq!(header_label("   ", 27), "(empty AA)");
    }

    #[test]
    fn derive_mixed_row() {
        let row = vec!["ID".to_string(), "".to_string(), "City".to_string()];
        assert_eq!(derive_headers(&row), vec!["ID", "(empty B)", "City"]);
    }
}
