//! # CSV Reader
//!
//! Turns comma separated text into a grid of trimmed string fields.
//! Double-quoted fields may contain commas, newlines and doubled quotes,
//! which the monster database needs for names like `"Giant, Hill"`.

use crate::{WildError, WildResult};

/// Parses CSV text into records. Blank lines are skipped.
///
/// Shape is not checked here; [`crate::Table::from_grid`] enforces that the
/// result is rectangular.
///
/// # Examples
///
/// ```
/// use wildsim::tables::reader::parse_csv;
///
/// let grid = parse_csv("demo", "Name,Number\n\"Giant, Hill\",1d4\n").unwrap();
/// assert_eq!(grid[1], vec!["Giant, Hill".to_string(), "1d4".to_string()]);
/// ```
pub fn parse_csv(table: &str, text: &str) -> WildResult<Vec<Vec<String>>> {
    let text = text.trim_start_matches('\u{feff}');
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => record.push(finish_field(&mut field)),
            '\r' => {}
            '\n' => {
                record.push(finish_field(&mut field));
                push_record(&mut records, std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(WildError::MalformedTable {
            table: table.to_string(),
            reason: "unterminated quoted field".to_string(),
        });
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(finish_field(&mut field));
        push_record(&mut records, record);
    }

    Ok(records)
}

fn finish_field(field: &mut String) -> String {
    let value = field.trim().to_string();
    field.clear();
    value
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    // Blank line
    if record.len() == 1 && record[0].is_empty() {
        return;
    }
    records.push(record);
}
