//! Random source capability and dice notation
//!
//! Every roll in the resolver goes through a [`RandomSource`] handed in by the
//! caller. Production code wraps a seeded ChaCha generator; scenario tests feed
//! exact die faces through [`ScriptedRolls`].

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use nom::character::complete::{digit1, multispace0, one_of};
use nom::combinator::{all_consuming, map_res, opt};
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WarError};

/// Capability object yielding uniform integers and floats
pub trait RandomSource {
    /// Uniform face in `1..=sides`. A zero-sided die always yields 0.
    fn roll_die(&mut self, sides: u32) -> u32;

    /// Uniform index in `0..len`. Callers must not pass an empty length.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Uniform float in `[0, 1)`
    fn chance(&mut self) -> f64;
}

/// Adapter turning any `rand` generator into a [`RandomSource`]
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn roll_die(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.rng.gen_range(1..=sides)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index on empty slice");
        self.rng.gen_range(0..len.max(1))
    }

    fn chance(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Deterministic source used by the CLI and tests
pub type SeededRng = RngSource<ChaCha8Rng>;

impl SeededRng {
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

/// Queue-backed source: returns supplied values in order.
///
/// Exhausted queues fall back to the minimum (face 1, index 0, chance 0.0).
/// Die faces are clamped into `1..=sides` and picks into `0..len`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    dice: VecDeque<u32>,
    picks: VecDeque<usize>,
    chances: VecDeque<f64>,
}

impl ScriptedRolls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dice(mut self, faces: impl IntoIterator<Item = u32>) -> Self {
        self.dice.extend(faces);
        self
    }

    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    pub fn with_chances(mut self, chances: impl IntoIterator<Item = f64>) -> Self {
        self.chances.extend(chances);
        self
    }

    /// Number of die faces not yet consumed
    pub fn remaining_dice(&self) -> usize {
        self.dice.len()
    }
}

impl RandomSource for ScriptedRolls {
    fn roll_die(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.dice.pop_front().unwrap_or(1).clamp(1, sides)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.picks
            .pop_front()
            .unwrap_or(0)
            .min(len.saturating_sub(1))
    }

    fn chance(&mut self) -> f64 {
        self.chances.pop_front().unwrap_or(0.0).clamp(0.0, 1.0)
    }
}

/// Dice expression in `NdM[+K|-K]` notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dice {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

/// Upper bound on dice per expression
pub const MAX_DICE_COUNT: u32 = 100;

impl Dice {
    pub const D4: Dice = Dice::new(1, 4);
    pub const D6: Dice = Dice::new(1, 6);

    pub const fn new(count: u32, sides: u32) -> Self {
        Self {
            count,
            sides,
            modifier: 0,
        }
    }

    pub const fn with_modifier(self, modifier: i32) -> Self {
        Self { modifier, ..self }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let parsed = all_consuming(delimited(multispace0, notation, multispace0)).parse(text);
        let (_, (count, sides, modifier)) =
            parsed.map_err(|_| WarError::InvalidDice(text.to_string()))?;

        let count = count.unwrap_or(1);
        if count == 0 || count > MAX_DICE_COUNT || sides == 0 {
            return Err(WarError::InvalidDice(text.to_string()));
        }

        Ok(Self {
            count,
            sides,
            modifier: modifier.unwrap_or(0),
        })
    }

    /// Roll every die, add the modifier, floor at 0
    pub fn roll<R: RandomSource + ?Sized>(&self, rng: &mut R) -> u32 {
        let total: i64 = (0..self.count)
            .map(|_| i64::from(rng.roll_die(self.sides)))
            .sum::<i64>()
            + i64::from(self.modifier);
        total.clamp(0, i64::from(u32::MAX)) as u32
    }

    pub fn min_total(&self) -> u32 {
        (i64::from(self.count) + i64::from(self.modifier)).max(0) as u32
    }

    pub fn max_total(&self) -> u32 {
        (i64::from(self.count) * i64::from(self.sides) + i64::from(self.modifier)).max(0) as u32
    }
}

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |digits: &str| digits.parse::<u32>()).parse(input)
}

fn modifier(input: &str) -> IResult<&str, i32> {
    map_res(pair(one_of("+-"), digit1), |(sign, digits): (char, &str)| {
        digits
            .parse::<i32>()
            .map(|value| if sign == '-' { -value } else { value })
    })
    .parse(input)
}

fn notation(input: &str) -> IResult<&str, (Option<u32>, u32, Option<i32>)> {
    (opt(number), preceded(one_of("dD"), number), opt(modifier)).parse(input)
}

impl FromStr for Dice {
    type Err = WarError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Dice {
    type Error = WarError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Dice> for String {
    fn from(dice: Dice) -> Self {
        dice.to_string()
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{}", m),
            m => write!(f, "{}", m),
        }
    }
}
