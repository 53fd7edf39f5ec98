//! # Tables Module
//!
//! Rectangular game tables read from CSV files.
//!
//! Row 0 holds the column titles and column 0 holds the row titles; every
//! other cell is data. Indices are 1-based throughout so that index `i`
//! always names the same row or column as in the source file. A data cell
//! containing the null marker (`-`) is stored as `None` and is never returned
//! by random sampling.

pub mod reader;

use crate::config::NULL_ENTRY;
use crate::utils::roll_die;
use crate::{WildError, WildResult};
use rand::Rng;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// One data row: its title plus the data cells after the title column.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TableRow {
    name: String,
    cells: Vec<Option<String>>,
}

/// A generic text game table.
///
/// # Examples
///
/// ```
/// use wildsim::Table;
///
/// let table = Table::parse("main", "Roll,Clear,Mountain\n1,Men,Giant\n2,-,Dragon\n").unwrap();
/// assert_eq!(table.col_count(), 2);
/// assert_eq!(table.col_index("Mountain"), Some(2));
/// assert_eq!(table.cell(2, 1), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    /// Full header row, including the corner title at index 0
    headers: Vec<String>,
    rows: Vec<TableRow>,
}

impl Table {
    /// Builds a table from a grid of cells, checking that it is rectangular.
    pub fn from_grid(name: impl Into<String>, grid: Vec<Vec<String>>) -> WildResult<Self> {
        let name = name.into();
        let mut lines = grid.into_iter();

        let headers = lines.next().ok_or_else(|| WildError::MalformedTable {
            table: name.clone(),
            reason: "no header row".to_string(),
        })?;
        let width = headers.len();

        let mut rows = Vec::new();
        for (offset, line) in lines.enumerate() {
            if line.len() != width {
                return Err(WildError::MalformedTable {
                    table: name,
                    reason: format!(
                        "row {} has {} cells, expected {}",
                        offset + 1,
                        line.len(),
                        width
                    ),
                });
            }

            let mut cells = line.into_iter();
            let row_name = cells.next().unwrap_or_default();
            let cells = cells
                .map(|cell| if cell == NULL_ENTRY { None } else { Some(cell) })
                .collect();
            rows.push(TableRow {
                name: row_name,
                cells,
            });
        }

        Ok(Self {
            name,
            headers,
            rows,
        })
    }

    /// Parses CSV text into a table.
    pub fn parse(name: impl Into<String>, text: &str) -> WildResult<Self> {
        let name = name.into();
        let grid = reader::parse_csv(&name, text)?;
        Self::from_grid(name, grid)
    }

    /// Loads a table from a CSV file, named after the file stem.
    pub fn load(path: impl AsRef<Path>) -> WildResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let table = Self::parse(name, &text)?;
        log::info!(
            "Loaded table {} ({} rows x {} columns) from {}",
            table.name,
            table.row_count(),
            table.col_count(),
            path.display()
        );
        Ok(table)
    }

    /// Table name used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of data columns.
    pub fn col_count(&self) -> usize {
        self.headers.len().saturating_sub(1)
    }

    /// Title of row `index`.
    pub fn row_name(&self, index: usize) -> Option<&str> {
        let row = index.checked_sub(1)?;
        self.rows.get(row).map(|row| row.name.as_str())
    }

    /// Title of column `index`.
    pub fn col_name(&self, index: usize) -> Option<&str> {
        if index == 0 {
            return None;
        }
        self.headers.get(index).map(String::as_str)
    }

    /// Index of the first row titled `name`.
    pub fn row_index(&self, name: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.name == name)
            .map(|i| i + 1)
    }

    /// Index of the first column titled `name`.
    pub fn col_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .skip(1)
            .position(|header| header == name)
            .map(|i| i + 1)
    }

    /// Data cell at (`row`, `col`); `None` for null or out-of-range cells.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        let row = self.rows.get(row.checked_sub(1)?)?;
        row.cells.get(col.checked_sub(1)?)?.as_deref()
    }

    /// Uniformly random non-null entry of row `row`.
    ///
    /// Draws cells until one is non-null. A row without any entries is an
    /// error instead of an endless loop.
    pub fn random_cell_in_row<R: Rng + ?Sized>(&self, row: usize, rng: &mut R) -> WildResult<&str> {
        if !self.row_has_entries(row) {
            return Err(self.empty_line(format!("row {}", row)));
        }
        loop {
            let col = roll_die(self.col_count() as u32, rng) as usize;
            if let Some(entry) = self.cell(row, col) {
                return Ok(entry);
            }
        }
    }

    /// Uniformly random non-null entry of column `col`.
    ///
    /// Draws cells until one is non-null. A column without any entries is an
    /// error instead of an endless loop.
    pub fn random_cell_in_col<R: Rng + ?Sized>(&self, col: usize, rng: &mut R) -> WildResult<&str> {
        if !self.col_has_entries(col) {
            return Err(self.empty_line(format!("column {}", col)));
        }
        loop {
            let row = roll_die(self.row_count() as u32, rng) as usize;
            if let Some(entry) = self.cell(row, col) {
                return Ok(entry);
            }
        }
    }

    fn row_has_entries(&self, row: usize) -> bool {
        (1..=self.col_count()).any(|col| self.cell(row, col).is_some())
    }

    fn col_has_entries(&self, col: usize) -> bool {
        (1..=self.row_count()).any(|row| self.cell(row, col).is_some())
    }

    /// Checks that every column can be sampled.
    pub fn validate_columns(&self) -> WildResult<()> {
        match (1..=self.col_count()).find(|&col| !self.col_has_entries(col)) {
            Some(col) => Err(self.empty_line(format!(
                "column {} ({})",
                col,
                self.col_name(col).unwrap_or_default()
            ))),
            None => Ok(()),
        }
    }

    fn empty_line(&self, line: String) -> WildError {
        WildError::EmptyLine {
            table: self.name.clone(),
            line,
        }
    }

    /// Human-readable summary of the table shape and column titles.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Table: {}", self.name);
        let _ = writeln!(out, "Number of rows: {}", self.row_count());
        let _ = writeln!(out, "Number of columns: {}", self.col_count());
        let _ = writeln!(out, "Column headers:");
        for header in self.headers.iter().skip(1) {
            let _ = writeln!(out, "  {}", header);
        }
        out
    }
}
