use crate::generators::PlayerGenerator;
use crate::loaders::PlayerDatabase;
use log::info;

pub const SAMPLE_CLUBS: [&str; 10] = [
    "FC Barcelona",
    "Real Madrid",
    "Manchester United",
    "Bayern Munich",
    "Liverpool",
    "Paris SG",
    "Juventus",
    "AC Milan",
    "Arsenal",
    "Chelsea",
];

pub struct DatabaseGenerator;

impl DatabaseGenerator {
    /// A synthetic database with `players_per_club` players for every club in `clubs`.
    pub fn generate(clubs: &[&str], players_per_club: usize, seed: u64) -> PlayerDatabase {
        let mut player_generator = PlayerGenerator::with_seed(seed);

        let players = clubs
            .iter()
            .flat_map(|club| {
                (0..players_per_club)
                    .map(|_| player_generator.generate(club))
                    .collect::<Vec<_>>()
            })
            .collect();

        let database = PlayerDatabase::from_players(players);

        info!(
            "generated {} sample players for {} clubs",
            database.players_count(),
            clubs.len()
        );

        database
    }

    /// The sample clubs plus any extra club names that are not among them.
    pub fn sample_clubs<'a>(extra: &[&'a str]) -> Vec<&'a str> {
        let mut clubs: Vec<&'a str> = SAMPLE_CLUBS.to_vec();

        for club in extra {
            if !clubs.iter().any(|c| c.eq_ignore_ascii_case(club)) {
                clubs.push(*club);
            }
        }

        clubs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_clubs() {
        let database = DatabaseGenerator::generate(&["River Plate", "Liverpool"], 15, 7);

        assert_eq!(database.players_count(), 30);
        assert_eq!(database.clubs_with_min_players(15).len(), 2);

        let (_, squad) = database.club("River Plate").unwrap();
        assert!(squad.iter().all(|p| p.club == "River Plate"));
    }

    #[test]
    fn test_sample_clubs_include_extra_names() {
        let clubs = DatabaseGenerator::sample_clubs(&["River Plate", "liverpool"]);

        assert_eq!(clubs.len(), 11);
        assert!(clubs.contains(&"River Plate"));
    }
}
