use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::symbols::Wager;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub starting_balance: u64,
    pub shuffle_interval_ms: u64,
    pub spin_duration_ms: u64,
    pub default_wager: Wager,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_balance: 1000,
            shuffle_interval_ms: 100,
            spin_duration_ms: 2000,
            default_wager: Wager::Ten,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shuffle_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "shuffle_interval_ms must be positive".into(),
            ));
        }
        if self.spin_duration_ms < self.shuffle_interval_ms {
            return Err(ConfigError::Invalid(format!(
                "spin_duration_ms ({}) shorter than shuffle_interval_ms ({})",
                self.spin_duration_ms, self.shuffle_interval_ms
            )));
        }
        Ok(())
    }

    pub fn shuffle_interval(&self) -> Duration {
        Duration::from_millis(self.shuffle_interval_ms)
    }

    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json_str(r#"{"starting_balance": 250}"#).unwrap();
        assert_eq!(cfg.starting_balance, 250);
        assert_eq!(cfg.spin_duration(), Duration::from_millis(2000));
        assert_eq!(cfg.default_wager, Wager::Ten);
    }

    #[test]
    fn rejects_bad_timings() {
        assert!(matches!(
            GameConfig::from_json_str(r#"{"shuffle_interval_ms": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json_str(r#"{"spin_duration_ms": 50}"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_off_menu_wager() {
        assert!(matches!(
            GameConfig::from_json_str(r#"{"default_wager": 25}"#),
            Err(ConfigError::Parse(_))
        ));
    }
}
