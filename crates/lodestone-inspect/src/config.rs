use lodestone_protocol_core::ProtocolState;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct InspectConfig {
    #[serde(default = "default_capture")]
    pub capture: PathBuf,
    #[serde(default)]
    pub initial_state: InitialState,
    #[serde(default)]
    pub stop_on_error: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_max_frame_size")]
    pub max_frame_size: usize,
    /// JSON array of sound names in registry order. The embedded table is
    /// used when unset.
    #[serde(default)]
    pub sound_table: Option<PathBuf>,
}

/// State the capture starts in, for captures that begin mid-connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialState {
    #[default]
    Handshake,
    Status,
    Login,
    Game,
}

impl InitialState {
    /// Transitions that lead from the handshake to this state.
    pub fn path(self) -> &'static [ProtocolState] {
        match self {
            InitialState::Handshake => &[],
            InitialState::Status => &[ProtocolState::Status],
            InitialState::Login => &[ProtocolState::Login],
            InitialState::Game => &[ProtocolState::Login, ProtocolState::Game],
        }
    }
}

fn default_capture() -> PathBuf {
    "capture.bin".into()
}

fn default_log_level() -> String {
    "info".into()
}

fn default_max_frame_size() -> usize {
    // Largest length a 3-byte varint can carry, same as the game's limit
    2_097_151
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            capture: default_capture(),
            initial_state: InitialState::default(),
            stop_on_error: false,
            log_level: default_log_level(),
            max_frame_size: default_max_frame_size(),
            sound_table: None,
        }
    }
}

impl InspectConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: InspectConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::info!("No config file found at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: InspectConfig = toml::from_str(r#"initial_state = "game""#).unwrap();
        assert_eq!(config.initial_state, InitialState::Game);
        assert_eq!(config.capture, PathBuf::from("capture.bin"));
        assert_eq!(config.max_frame_size, 2_097_151);
        assert!(!config.stop_on_error);
        assert!(config.sound_table.is_none());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = InspectConfig::load(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.initial_state, InitialState::Handshake);
    }

    #[test]
    fn test_bad_state_rejected() {
        assert!(toml::from_str::<InspectConfig>(r#"initial_state = "play""#).is_err());
    }

    #[test]
    fn test_paths_are_legal() {
        for state in [
            InitialState::Handshake,
            InitialState::Status,
            InitialState::Login,
            InitialState::Game,
        ] {
            let mut current = ProtocolState::Handshake;
            for &next in state.path() {
                assert!(current.can_transition_to(next));
                current = next;
            }
        }
    }
}
