//! # Encounters Module
//!
//! Wilderness encounter resolution and the simulation driver.
//!
//! An encounter is rolled by drawing a subtable from the terrain's column of
//! the main table, a monster from that subtable's column, and then scoring
//! the monster's effective hit dice (EHD) from its database row.

pub mod fixups;
pub mod resolver;
pub mod simulation;

pub use fixups::*;
pub use resolver::*;
pub use simulation::*;

use crate::config;
use crate::{Table, WildResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Monster database columns read while scoring an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterColumns {
    /// Number appearing, as a dice expression
    pub number: usize,
    /// Hit dice number, as a decimal
    pub hit_dice_number: usize,
    /// Effective hit dice, as an integer
    pub ehd: usize,
}

impl Default for MonsterColumns {
    fn default() -> Self {
        Self {
            number: config::MONSTER_NUM_COL,
            hit_dice_number: config::MONSTER_HDN_COL,
            ehd: config::MONSTER_EHD_COL,
        }
    }
}

/// Configuration for a simulation run.
///
/// Every field has a default, so a JSON configuration file only needs the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Directory holding the three table files
    pub data_dir: PathBuf,
    /// Main table file name (terrain columns)
    pub main_table: String,
    /// Sub table file name (subtable columns)
    pub sub_table: String,
    /// Monster database file name (one row per monster)
    pub monster_table: String,
    /// Number of encounters to roll
    pub num_encounters: usize,
    /// Random seed; entropy when absent
    pub seed: Option<u64>,
    /// Monster database column layout
    pub monster_columns: MonsterColumns,
}

impl SimulationConfig {
    /// Creates the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use wildsim::SimulationConfig;
    ///
    /// let config = SimulationConfig::new();
    /// assert_eq!(config.num_encounters, 1000);
    /// assert!(config.seed.is_none());
    /// ```
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from(config::DEFAULT_DATA_DIR),
            main_table: config::MAIN_TABLE_FILE.to_string(),
            sub_table: config::SUB_TABLE_FILE.to_string(),
            monster_table: config::MONSTER_TABLE_FILE.to_string(),
            num_encounters: config::NUM_ENCOUNTERS,
            seed: None,
            monster_columns: MonsterColumns::default(),
        }
    }

    /// Creates a seeded configuration with a short run for tests.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            num_encounters: 100,
            seed: Some(seed),
            ..Self::new()
        }
    }

    /// Reads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> WildResult<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Full path of a table file inside the data directory.
    pub fn table_path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    /// Creates the random number generator for a run.
    pub fn create_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The three read-only tables a simulation draws from.
#[derive(Debug, Clone)]
pub struct WildTables {
    /// Terrain columns listing subtables
    pub main: Table,
    /// Subtable columns listing monsters
    pub sub: Table,
    /// Monster statistics, one row per monster
    pub monsters: Table,
}

impl WildTables {
    /// Bundles tables, rejecting any main or sub table column with no entries.
    pub fn new(main: Table, sub: Table, monsters: Table) -> WildResult<Self> {
        main.validate_columns()?;
        sub.validate_columns()?;
        Ok(Self { main, sub, monsters })
    }

    /// Loads the tables named by the configuration.
    pub fn load(config: &SimulationConfig) -> WildResult<Self> {
        let main = Table::load(config.table_path(&config.main_table))?;
        let sub = Table::load(config.table_path(&config.sub_table))?;
        let monsters = Table::load(config.table_path(&config.monster_table))?;
        Self::new(main, sub, monsters)
    }

    /// Terrain names available in the main table.
    pub fn terrains(&self) -> Vec<&str> {
        (1..=self.main.col_count())
            .filter_map(|col| self.main.col_name(col))
            .collect()
    }

    /// Shape summary of all three tables.
    pub fn describe(&self) -> String {
        [&self.main, &self.sub, &self.monsters]
            .iter()
            .map(|table| table.describe())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
