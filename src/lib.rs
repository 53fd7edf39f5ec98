//! # Wildsim
//!
//! Wilderness encounter simulator for OD&D-style random encounter tables.
//!
//! ## Architecture Overview
//!
//! A simulation rolls through a chain of weighted lookup tables and turns the
//! result into a single "effective hit dice" (EHD) number per encounter:
//!
//! - **Tables**: rectangular CSV grids with header row and column, null cells
//!   modelled as `None`
//! - **Dice**: `NdS+M` expressions and single die rolls over an injected RNG
//! - **Encounters**: the terrain → subtable → monster resolution chain, the
//!   name fixup rules and the EHD arithmetic
//! - **Simulation**: repeated independent trials written one number per line
//!
//! Randomness always flows through a caller-supplied [`rand::Rng`], so a seeded
//! [`rand::rngs::StdRng`] reproduces a run exactly.

pub mod encounters;
pub mod tables;
pub mod utils;

pub use encounters::*;
pub use tables::*;
pub use utils::*;

/// Core error type for the simulator.
#[derive(thiserror::Error, Debug)]
pub enum WildError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be deserialized
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Table source is empty or not rectangular
    #[error("Malformed table {table}: {reason}")]
    MalformedTable { table: String, reason: String },

    /// A row or column holds nothing but null entries
    #[error("Table {table} has no entries in {line}")]
    EmptyLine { table: String, line: String },

    /// Terrain is not a column of the main table
    #[error("Unknown terrain: {0}")]
    UnknownTerrain(String),

    /// Subtable is not a column of the sub table
    #[error("Unknown subtable: {0}")]
    UnknownSubTable(String),

    /// Monster is not a row of the monster database
    #[error("Unknown monster: {0}")]
    UnknownMonster(String),
}

impl WildError {
    /// Whether a single trial may swallow this error and score zero.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            WildError::UnknownSubTable(_) | WildError::UnknownMonster(_)
        )
    }
}

/// Result type used throughout the simulator.
pub type WildResult<T> = Result<T, WildError>;

/// Version information for the simulator.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation constants.
pub mod config {
    /// Default number of encounters per run
    pub const NUM_ENCOUNTERS: usize = 1000;

    /// Cell text marking a null table entry
    pub const NULL_ENTRY: &str = "-";

    /// Default directory holding the table files
    pub const DEFAULT_DATA_DIR: &str = "data";

    /// Terrain to subtable table
    pub const MAIN_TABLE_FILE: &str = "WildMainTable.csv";

    /// Subtable to monster table
    pub const SUB_TABLE_FILE: &str = "WildSubTable.csv";

    /// Monster statistics table
    pub const MONSTER_TABLE_FILE: &str = "MonsterDatabase.csv";

    /// Monster database column holding number appearing
    pub const MONSTER_NUM_COL: usize = 1;

    /// Monster database column holding hit dice number
    pub const MONSTER_HDN_COL: usize = 12;

    /// Monster database column holding EHD
    pub const MONSTER_EHD_COL: usize = 13;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        assert!(WildError::UnknownSubTable("Men".to_string()).is_recoverable());
        assert!(WildError::UnknownMonster("Orc".to_string()).is_recoverable());
        assert!(!WildError::UnknownTerrain("Moon".to_string()).is_recoverable());
        assert!(!WildError::EmptyLine {
            table: "main".to_string(),
            line: "column 1".to_string(),
        }
        .is_recoverable());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            WildError::UnknownMonster("Gelatinous Cube".to_string()).to_string(),
            "Unknown monster: Gelatinous Cube"
        );
        assert_eq!(
            WildError::UnknownTerrain("Moon".to_string()).to_string(),
            "Unknown terrain: Moon"
        );
    }
}
