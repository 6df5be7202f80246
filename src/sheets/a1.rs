// src/sheets/a1.rs

/// Convert a 1-based column number to its A1 letter form (1 → "A", 27 → "AA").
pub fn column_letters(mut col: usize) -> String {
    debug_assert!(col >= 1);
    let mut letters = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.push(b'A' + rem as u8);
        col = (col - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).expect("column letters are ASCII")
}

/// Quote a sheet name for use in an A1 range. Names that are not plain
/// alphanumeric must be wrapped in single quotes, with embedded quotes doubled.
pub fn quote_sheet_name(name: &str) -> String {
    let plain = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.chars().next().unwrap().is_ascii_digit();
    if plain {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}

/// A1 range covering an entire sheet.
pub fn sheet_range(sheet_name: &str) -> String {
    quote_sheet_name(sheet_name)
}

/// A1 reference for a single cell, given 1-based row and column numbers.
pub fn cell_range(sheet_name: &str, row: usize, col: usize) -> String {
    format!("{}!{}{}", quote_sheet_name(sheet_name), column_letters(col), row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(1), "A");
        assert_eq!(column_letters(2), "B");
        assert_eq!(column_letters(26), "Z");
        assert_eq!(column_letters(27), "AA");
        assert_eq!(column_letters(52), "AZ");
        assert_eq!(column_letters(53), "BA");
        assert_eq!(column_letters(702), "ZZ");
        assert_eq!(column_letters(703), "AAA");
    }

    #[test]
    fn test_quote_sheet_name() {
        assert_eq!(quote_sheet_name("Credits"), "Credits");
        assert_eq!(quote_sheet_name("credit_log"), "credit_log");
        assert_eq!(quote_sheet_name("Credit Log"), "'Credit Log'");
        assert_eq!(quote_sheet_name("2024"), "'2024'");
        assert_eq!(quote_sheet_name("bob's sheet"), "'bob''s sheet'");
    }

    #[test]
    fn test_cell_range() {
        assert_eq!(cell_range("Credits", 5, 3), "Credits!C5");
        assert_eq!(cell_range("Credit Log", 12, 28), "'Credit Log'!AB12");
    }
}
