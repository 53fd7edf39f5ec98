//! # Utilities Module
//!
//! Dice rolling and lenient numeric parsing shared by the table and
//! encounter systems.

pub mod dice;
pub mod parse;

pub use dice::*;
pub use parse::*;
