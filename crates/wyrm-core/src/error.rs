use thiserror::Error;

/// Top-level error type for wyrm-core.
#[derive(Debug, Error)]
pub enum WyrmError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Invalid chain: {0}")]
    Chain(#[from] ChainError),

    #[error("Invalid tip_damping: {0} (must be within [0, 0.5])")]
    InvalidTipDamping(f64),

    #[error("Invalid iterations: {0} (must be >= 1)")]
    InvalidIterations(u32),

    #[error("Invalid tick_hz: {0} (must be > 0)")]
    InvalidTickHz(f64),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Chain construction errors.
///
/// Copy + static messages; raised only before the first tick runs.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ChainError {
    #[error("Chain has no links")]
    Empty,

    #[error("Rest length {value} at link {index} must be finite and > 0")]
    InvalidRestLength { index: usize, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wyrm_error_from_config_error() {
        let err = ConfigError::InvalidTipDamping(0.9);
        let wyrm_err: WyrmError = err.into();
        assert!(matches!(wyrm_err, WyrmError::Config(_)));
        assert!(wyrm_err.to_string().contains("0.9"));
    }

    #[test]
    fn wyrm_error_from_chain_error() {
        let wyrm_err: WyrmError = ChainError::Empty.into();
        assert!(matches!(wyrm_err, WyrmError::Chain(_)));
    }

    #[test]
    fn config_error_from_chain_error() {
        let err = ChainError::InvalidRestLength {
            index: 2,
            value: -1.0,
        };
        let config_err: ConfigError = err.into();
        assert!(matches!(config_err, ConfigError::Chain(_)));
        assert!(config_err.to_string().contains("link 2"));
    }

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let config_err: ConfigError = io_err.into();
        assert!(matches!(config_err, ConfigError::Io(_)));
    }

    #[test]
    fn chain_error_is_copy() {
        let err = ChainError::Empty;
        let err2 = err;
        assert_eq!(err, err2);
    }

    #[test]
    fn chain_error_display_messages() {
        assert_eq!(ChainError::Empty.to_string(), "Chain has no links");
        assert_eq!(
            ChainError::InvalidRestLength {
                index: 0,
                value: 0.0
            }
            .to_string(),
            "Rest length 0 at link 0 must be finite and > 0"
        );
    }

    #[test]
    fn config_error_display_messages() {
        assert_eq!(
            ConfigError::InvalidTipDamping(0.75).to_string(),
            "Invalid tip_damping: 0.75 (must be within [0, 0.5])"
        );
        assert_eq!(
            ConfigError::InvalidIterations(0).to_string(),
            "Invalid iterations: 0 (must be >= 1)"
        );
        assert_eq!(
            ConfigError::InvalidTickHz(0.0).to_string(),
            "Invalid tick_hz: 0 (must be > 0)"
        );
        assert_eq!(
            ConfigError::InvalidValue {
                field: "bone_count".into(),
                message: "must be non-zero".into()
            }
            .to_string(),
            "Invalid value for bone_count: must be non-zero"
        );
    }
}
