use std::path::PathBuf;

use crate::core::SequencerError;
use crate::game::Phase;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can occur while driving a game.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("phase transition failed: {0}")]
    Sequencer(#[from] SequencerError<Phase>),

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("game is over")]
    GameOver,

    #[error("game is paused")]
    Paused,

    #[error("game is not paused")]
    NotPaused,

    #[error("a turn is already in progress")]
    TurnInProgress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("four_chance_percent must be <= 100".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: four_chance_percent must be <= 100"
        );
    }

    #[test]
    fn test_game_error_display() {
        let err = GameError::from(SequencerError::UnknownState(Phase::Spawn));
        assert_eq!(err.to_string(), "phase transition failed: invalid state id: Spawn");

        let err: GameError = SequencerError::<Phase>::EmptyStack.into();
        assert_eq!(err.to_string(), "phase transition failed: return with empty gosub stack");

        assert_eq!(GameError::TurnInProgress.to_string(), "a turn is already in progress");
    }
}
