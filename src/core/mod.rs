pub mod config;
pub mod dice;
pub mod error;
pub mod types;

pub use config::{load_config, parse_config, DrawMode, WarConfig};
pub use dice::{Dice, RandomSource, RngSource, ScriptedRolls, SeededRng};
pub use error::{Result, WarError};
