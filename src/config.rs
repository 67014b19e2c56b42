use std::path::Path;

use crate::error::ConfigError;
use crate::game::{is_valid_player_name, Board};

/// Session settings, loadable from TOML.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the board: 6, 8 or 10
    pub board_size: usize,
    pub player1_name: String,
    pub player2_name: String,
    /// Player 2 is driven by the computer
    pub vs_computer: bool,
    /// Seed for the computer's random move choice; OS entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Pause before each computer move in the console host
    pub computer_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: 8,
            player1_name: "Player1".to_string(),
            player2_name: "Player2".to_string(),
            vs_computer: true,
            seed: None,
            computer_delay_ms: 0,
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: GameConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !Board::is_valid_size(self.board_size) {
            return Err(ConfigError::Validation(format!(
                "board_size must be 6, 8 or 10 (got {})",
                self.board_size
            )));
        }
        if !is_valid_player_name(&self.player1_name) {
            return Err(ConfigError::Validation(
                "player1_name must be non-blank, at most 20 characters, without spaces".into(),
            ));
        }
        // The computer names itself when player 2's name is left blank
        let player2_blank = self.player2_name.trim().is_empty();
        if !(self.vs_computer && player2_blank) && !is_valid_player_name(&self.player2_name) {
            return Err(ConfigError::Validation(
                "player2_name must be non-blank, at most 20 characters, without spaces".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&GameConfig::default()).expect("default config serializes")
    }
}
