use std::path::PathBuf;

/// Errors that can occur while reading or writing the saved board.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read saved board from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write saved board to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("saved board in {slot} is corrupted: {source}")]
    Corrupted {
        slot: String,
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a persisted board cannot be resumed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResumeError {
    #[error("piece counts out of balance (player 1: {player_one}, player 2: {player_two})")]
    ImbalancedCounts {
        player_one: usize,
        player_two: usize,
    },

    #[error("piece at row {row}, column {col} floats above an empty cell")]
    FloatingPiece { row: usize, col: usize },

    #[error("saved game is already finished")]
    Finished,
}

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

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Read {
            path: PathBuf::from("board.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read saved board from board.json: denied"
        );
    }

    #[test]
    fn test_resume_error_display() {
        let err = ResumeError::ImbalancedCounts {
            player_one: 4,
            player_two: 1,
        };
        assert_eq!(
            err.to_string(),
            "piece counts out of balance (player 1: 4, player 2: 1)"
        );
        assert_eq!(
            ResumeError::FloatingPiece { row: 2, col: 6 }.to_string(),
            "piece at row 2, column 6 floats above an empty cell"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("ui.initial_column must be < 7".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: ui.initial_column must be < 7"
        );
    }
}
