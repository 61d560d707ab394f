use crate::error::{DataError, DataResult};
use engine::NegotiationConfig;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_SETTINGS_JSON: &str = include_str!("../data/settings.json");

/// Run settings: which clubs meet and how the negotiation is tuned.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub buyer_club: String,
    pub seller_club: String,
    /// Clubs with fewer players cannot negotiate.
    pub min_players: usize,
    /// Squads are cut to this many players, in file order.
    pub max_players_per_club: usize,
    pub sample_players_per_club: usize,
    pub negotiation: NegotiationConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            buyer_club: "River Plate".to_string(),
            seller_club: "Liverpool".to_string(),
            min_players: 11,
            max_players_per_club: 30,
            sample_players_per_club: 25,
            negotiation: NegotiationConfig::default(),
        }
    }
}

pub struct SettingsLoader;

impl SettingsLoader {
    /// The settings bundled with the crate.
    pub fn load() -> DataResult<Settings> {
        Self::parse(DEFAULT_SETTINGS_JSON)
    }

    pub fn load_file<P: AsRef<Path>>(path: P) -> DataResult<Settings> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse(&json)
    }

    pub fn parse(json: &str) -> DataResult<Settings> {
        let settings: Settings = serde_json::from_str(json)?;

        settings.negotiation.validate()?;

        Ok(settings)
    }
}
