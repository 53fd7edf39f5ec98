//! # Simulation Driver
//!
//! Runs a batch of independent encounters for one terrain and writes each
//! encounter's total EHD on its own line, in trial order.

use super::resolver::EncounterResolver;
use super::{SimulationConfig, WildTables};
use crate::WildResult;
use rand::Rng;
use std::io::Write;

/// A configured batch of encounters for one terrain.
#[derive(Debug, Clone)]
pub struct Simulation<'t> {
    resolver: EncounterResolver<'t>,
    num_encounters: usize,
}

impl<'t> Simulation<'t> {
    /// Creates a simulation, failing if the terrain is unknown.
    pub fn new(tables: &'t WildTables, config: &SimulationConfig, terrain: &str) -> WildResult<Self> {
        Ok(Self {
            resolver: EncounterResolver::new(tables, terrain, config.monster_columns)?,
            num_encounters: config.num_encounters,
        })
    }

    /// Number of encounters in one run.
    pub fn num_encounters(&self) -> usize {
        self.num_encounters
    }

    /// Rolls one encounter and returns its total EHD.
    ///
    /// Unknown subtables and monsters are reported and score zero so that a
    /// long run keeps going; anything else is returned as an error.
    pub fn run_trial<R: Rng + ?Sized>(&self, rng: &mut R) -> WildResult<i32> {
        match self.resolver.resolve(rng) {
            Ok(encounter) => Ok(encounter.total_ehd()),
            Err(err) if err.is_recoverable() => {
                log::warn!("{}", err);
                Ok(0)
            }
            Err(err) => Err(err),
        }
    }

    /// Rolls every encounter and collects the results.
    pub fn collect<R: Rng + ?Sized>(&self, rng: &mut R) -> WildResult<Vec<i32>> {
        (0..self.num_encounters)
            .map(|_| self.run_trial(rng))
            .collect()
    }

    /// Rolls every encounter, writing one EHD per line. Returns the line count.
    pub fn run<R: Rng + ?Sized, W: Write>(&self, rng: &mut R, out: &mut W) -> WildResult<usize> {
        log::info!(
            "Rolling {} encounters for {}",
            self.num_encounters,
            self.resolver.terrain()
        );
        for _ in 0..self.num_encounters {
            let total = self.run_trial(rng)?;
            writeln!(out, "{}", total)?;
        }
        out.flush()?;
        Ok(self.num_encounters)
    }
}
