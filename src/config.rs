use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Most seats any variant can deal: five-card draw needs 5 cards a head.
pub const MAX_SEATS: usize = 10;

/// Table stakes and limits. Every field has a default, so a TOML file only
/// needs the values it changes.
///
/// ```
/// use poker_table::config::TableConfig;
///
/// let cfg = TableConfig::from_toml_str("big_blind = 20\nsmall_blind = 10").unwrap();
/// assert_eq!(cfg.big_blind, 20);
/// assert_eq!(cfg.starting_stack, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    pub small_blind: u64,
    pub big_blind: u64,
    /// Forced bet for the draw variant.
    pub ante: u64,
    /// Stack granted to an identity the player store has never seen.
    pub starting_stack: u64,
    pub max_seats: usize,
    /// Fixes the shuffle sequence for replays; random when unset.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 5,
            big_blind: 10,
            ante: 5,
            starting_stack: 1000,
            max_seats: MAX_SEATS,
            seed: None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl TableConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: TableConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.big_blind == 0 {
            return Err(ConfigError::Invalid("big_blind must be positive".into()));
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::Invalid(format!(
                "small_blind {} exceeds big_blind {}",
                self.small_blind, self.big_blind
            )));
        }
        if !(2..=MAX_SEATS).contains(&self.max_seats) {
            return Err(ConfigError::Invalid(format!(
                "max_seats must be within 2..={MAX_SEATS}, got {}",
                self.max_seats
            )));
        }
        Ok(())
    }
}
