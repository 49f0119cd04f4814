//! War configuration with documented constants
//!
//! The defaults reproduce the tabletop rules. A TOML file can override any
//! subset of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, WarError};

/// How hands are drawn at the start of each round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Two cards from the class-affine deck, with replacement
    #[default]
    Class,
    /// Two distinct cards from the full fifteen-card pool
    Mixed,
}

/// Tunable knobs for the AI policy and the war loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarConfig {
    /// Probability that a melee-role character attacks rather than defends
    pub melee_attack_chance: f64,

    /// Probability that a support (or unclassified) character attacks rather than defends
    pub support_attack_chance: f64,

    /// Probability that a card is played before the primary action
    ///
    /// Checked once per turn. A junk-granting card always unlocks one bonus
    /// card without a second roll.
    pub card_play_chance: f64,

    /// Junk tokens the AI spends on a single repair
    pub max_repair_tokens: u32,

    /// Damage penalty on the Snap Fire bonus attack (result floored at 1)
    pub bonus_attack_penalty: u32,

    /// Hard cap on rounds; reaching it ends the war with a tally
    pub max_rounds: u32,

    /// Card draw policy
    pub draw_mode: DrawMode,
}

impl Default for WarConfig {
    fn default() -> Self {
        Self {
            melee_attack_chance: 0.85,
            support_attack_chance: 0.80,
            card_play_chance: 0.90,
            max_repair_tokens: 2,
            bonus_attack_penalty: 2,
            max_rounds: 200,
            draw_mode: DrawMode::Class,
        }
    }
}

impl WarConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("melee_attack_chance", self.melee_attack_chance),
            ("support_attack_chance", self.support_attack_chance),
            ("card_play_chance", self.card_play_chance),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(WarError::InvalidConfig(format!(
                    "{} ({}) must be within [0, 1]",
                    name, value
                )));
            }
        }

        if self.max_repair_tokens == 0 {
            return Err(WarError::InvalidConfig(
                "max_repair_tokens must be at least 1".into(),
            ));
        }

        if self.max_rounds == 0 {
            return Err(WarError::InvalidConfig("max_rounds must be at least 1".into()));
        }

        Ok(())
    }
}

/// Load and validate a config from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<WarConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    tracing::info!("Loaded war config from {}", path.display());
    Ok(config)
}

/// Parse and validate a config from TOML text
pub fn parse_config(contents: &str) -> Result<WarConfig> {
    let config: WarConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(WarConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        let config = WarConfig::new();
        assert_eq!(config.melee_attack_chance, 0.85);
        assert_eq!(config.support_attack_chance, 0.80);
        assert_eq!(config.max_repair_tokens, 2);
        assert_eq!(config.draw_mode, DrawMode::Class);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = parse_config("max_rounds = 12\ndraw_mode = \"mixed\"\n").unwrap();
        assert_eq!(config.max_rounds, 12);
        assert_eq!(config.draw_mode, DrawMode::Mixed);
        assert_eq!(config.bonus_attack_penalty, 2);
    }

    #[test]
    fn test_rejects_out_of_range_probability() {
        let err = parse_config("card_play_chance = 1.5").unwrap_err();
        assert!(matches!(err, WarError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_zero_rounds() {
        let config = WarConfig {
            max_rounds: 0,
            ..WarConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = parse_config("max_rounds = \"many\"").unwrap_err();
        assert!(matches!(err, WarError::TomlError(_)));
    }

    #[test]
    fn test_load_shipped_config() {
        let config = load_config("data/war_config.toml").expect("Should load shipped config");
        assert_eq!(config, WarConfig::default());
    }
}
