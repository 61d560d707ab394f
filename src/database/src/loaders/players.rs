use crate::error::{DataError, DataResult};
use csv::StringRecord;
use engine::{Attribute, CurrencyValue, Player, PlayerSkills, UNKNOWN};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::path::Path;

const NAME_COLUMN: &str = "player";
const COUNTRY_COLUMN: &str = "country";
const AGE_COLUMN: &str = "age";
const CLUB_COLUMN: &str = "club";
const VALUE_COLUMN: &str = "value";

/// Players grouped by club, squads in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerDatabase {
    clubs: BTreeMap<String, Vec<Player>>,
}

impl PlayerDatabase {
    pub fn from_players(players: Vec<Player>) -> Self {
        let mut clubs: BTreeMap<String, Vec<Player>> = BTreeMap::new();

        for player in players {
            clubs.entry(player.club.clone()).or_default().push(player);
        }

        PlayerDatabase { clubs }
    }

    pub fn club_names(&self) -> Vec<&str> {
        self.clubs.keys().map(String::as_str).collect()
    }

    pub fn players_count(&self) -> usize {
        self.clubs.values().map(Vec::len).sum()
    }

    pub fn clubs_with_min_players(&self, min_players: usize) -> Vec<&str> {
        self.clubs
            .iter()
            .filter(|(_, squad)| squad.len() >= min_players)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Finds a club by exact name, then ignoring case. Returns the stored name and squad.
    pub fn club(&self, name: &str) -> DataResult<(&str, &[Player])> {
        let needle = name.trim();

        self.clubs
            .get_key_value(needle)
            .or_else(|| {
                self.clubs
                    .iter()
                    .find(|(club, _)| club.to_lowercase() == needle.to_lowercase())
            })
            .map(|(club, squad)| (club.as_str(), squad.as_slice()))
            .ok_or_else(|| DataError::ClubNotFound(needle.to_string()))
    }
}

/// Reads player exports: one row per player, `;` or `,` separated, with a header row.
pub struct PlayerLoader;

impl PlayerLoader {
    pub fn load_file<P: AsRef<Path>>(path: P) -> DataResult<PlayerDatabase> {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let database = Self::parse(&decode(&bytes))?;

        info!(
            "loaded {} players in {} clubs from {}",
            database.players_count(),
            database.clubs.len(),
            path.display()
        );

        Ok(database)
    }

    pub fn parse(text: &str) -> DataResult<PlayerDatabase> {
        let text = text.trim_start_matches('\u{feff}');

        let header = text
            .lines()
            .find(|line| !line.trim().is_empty())
            .ok_or(DataError::MissingHeader)?;

        let mut reader = reader(text, detect_delimiter(header));

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|c| c.to_lowercase())
            .collect();

        let column = |name: &str| columns.iter().position(|c| c == name);

        let name_index = column(NAME_COLUMN)
            .ok_or_else(|| DataError::MissingColumn(NAME_COLUMN.to_string()))?;
        let club_index = column(CLUB_COLUMN)
            .ok_or_else(|| DataError::MissingColumn(CLUB_COLUMN.to_string()))?;
        let country_index = column(COUNTRY_COLUMN);
        let age_index = column(AGE_COLUMN);
        let value_index = column(VALUE_COLUMN);

        let skill_indexes: Vec<(Attribute, Option<usize>)> = Attribute::ALL
            .iter()
            .map(|attribute| (*attribute, column(attribute.name())))
            .collect();

        for (attribute, index) in &skill_indexes {
            if index.is_none() {
                debug!("column {} missing, defaulting to 0", attribute);
            }
        }

        let mut players = Vec::new();
        let mut skipped = 0;

        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(error) => {
                    warn!("{}, skipping record", error);
                    skipped += 1;
                    continue;
                }
            };

            let line = record_line(&record);
            let field = |index: Option<usize>| {
                index
                    .and_then(|i| record.get(i))
                    .filter(|f| !f.is_empty() && !f.eq_ignore_ascii_case("nan"))
            };

            let (Some(name), Some(club)) = (field(Some(name_index)), field(Some(club_index)))
            else {
                skipped += 1;
                continue;
            };

            if name == UNKNOWN || club == UNKNOWN {
                skipped += 1;
                continue;
            }

            let mut skills = PlayerSkills::default();
            for (attribute, index) in &skill_indexes {
                skills.set(*attribute, field(*index).map(parse_number).unwrap_or(0.0) as f32);
            }

            let value = match field(value_index).map(CurrencyValue::parse) {
                Some(Ok(parsed)) => {
                    if parsed.ambiguous {
                        debug!(
                            "line {}: ambiguous value for {}, read as {}",
                            line, name, parsed.value
                        );
                    }
                    parsed.value
                }
                Some(Err(error)) => {
                    warn!("line {}: {}, using 0", line, error);
                    CurrencyValue::zero()
                }
                None => CurrencyValue::zero(),
            };

            let age = field(age_index)
                .map(parse_number)
                .unwrap_or(0.0)
                .clamp(0.0, u8::MAX as f64) as u8;

            let player = Player::builder()
                .id(players.len() as u32 + 1)
                .name(name)
                .country(field(country_index).unwrap_or(UNKNOWN))
                .age(age)
                .club(club)
                .value(value)
                .skills(skills)
                .build();

            match player {
                Ok(player) => players.push(player),
                Err(error) => {
                    warn!("line {}: {}", line, error);
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            debug!("skipped {} records without player or club", skipped);
        }

        Ok(PlayerDatabase::from_players(players))
    }
}

/// UTF-8 if valid, otherwise Latin-1.
fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn detect_delimiter(header: &str) -> u8 {
    if header.matches(';').count() >= header.matches(',').count() {
        b';'
    } else {
        b','
    }
}

fn reader(text: &str, delimiter: u8) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes())
}

/// File line the record starts on.
fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|position| position.line()).unwrap_or_default()
}

fn parse_number(text: &str) -> f64 {
    text.replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}
