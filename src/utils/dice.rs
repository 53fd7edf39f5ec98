//! # Dice
//!
//! Dice expressions in `NdS+M` notation and the single-die primitive every
//! random choice in the simulator is built on.

use super::parse::parse_int_or_zero;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rolls one die with the given number of sides.
///
/// Returns a uniform value in `1..=sides`, or 0 for a zero-sided die.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use wildsim::roll_die;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let roll = roll_die(6, &mut rng);
/// assert!((1..=6).contains(&roll));
/// ```
pub fn roll_die<R: Rng + ?Sized>(sides: u32, rng: &mut R) -> u32 {
    if sides == 0 {
        return 0;
    }
    rng.gen_range(1..=sides)
}

/// A dice expression: `count` dice of `sides` sides plus `modifier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceExpression {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

impl DiceExpression {
    /// Creates an unmodified `NdS` expression.
    pub fn new(count: u32, sides: u32) -> Self {
        Self {
            count,
            sides,
            modifier: 0,
        }
    }

    /// Creates an `NdS+M` expression.
    pub fn with_modifier(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// An expression that always evaluates to `value`.
    pub fn constant(value: i32) -> Self {
        Self::with_modifier(0, 0, value)
    }

    /// Parses table text such as `2d6`, `1d4+1`, `d8`, `3d6-2` or `5`.
    ///
    /// Parsing never fails. Any part that is not a number reads as zero, so
    /// text like `-` or `special` becomes an expression that rolls 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use wildsim::DiceExpression;
    ///
    /// assert_eq!(DiceExpression::parse("2d6+1"), DiceExpression::with_modifier(2, 6, 1));
    /// assert_eq!(DiceExpression::parse("d8"), DiceExpression::new(1, 8));
    /// assert_eq!(DiceExpression::parse("12"), DiceExpression::constant(12));
    /// assert_eq!(DiceExpression::parse("-"), DiceExpression::constant(0));
    /// ```
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let Some(split) = text.find(|c: char| c == 'd' || c == 'D') else {
            return Self::constant(parse_int_or_zero(text));
        };

        let count_text = text[..split].trim();
        let rest = &text[split + 1..];

        let count = if count_text.is_empty() {
            1
        } else {
            count_text.parse().unwrap_or(0)
        };

        let (sides_text, modifier) = match rest.find(|c: char| c == '+' || c == '-') {
            Some(sign) => (&rest[..sign], parse_int_or_zero(&rest[sign..])),
            None => (rest, 0),
        };
        let sides = sides_text.trim().parse().unwrap_or(0);

        Self::with_modifier(count, sides, modifier)
    }

    /// Rolls the expression once.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        let dice: i64 = (0..self.count)
            .map(|_| i64::from(roll_die(self.sides, rng)))
            .sum();
        clamp_i32(dice + i64::from(self.modifier))
    }

    /// Smallest possible result.
    pub fn min(&self) -> i32 {
        let per_die = i64::from(self.sides.min(1));
        clamp_i32(i64::from(self.count) * per_die + i64::from(self.modifier))
    }

    /// Largest possible result.
    pub fn max(&self) -> i32 {
        clamp_i32(i64::from(self.count) * i64::from(self.sides) + i64::from(self.modifier))
    }
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 0 || self.sides == 0 {
            return write!(f, "{}", self.modifier);
        }
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{}", m),
            m => write!(f, "{}", m),
        }
    }
}
