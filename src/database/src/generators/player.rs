use engine::{Attribute, Currency, CurrencyValue, Player, PlayerSkills};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

const SAMPLE_NAMES: [&str; 15] = [
    "Max Mustermann",
    "John Smith",
    "Carlos Rodriguez",
    "Luca Rossi",
    "Pierre Dubois",
    "Ahmed Hassan",
    "Hiroshi Tanaka",
    "Lars Andersen",
    "Miguel Santos",
    "Stefan Mueller",
    "Kevin O'Connor",
    "Antonio Silva",
    "Johan van der Berg",
    "Piotr Kowalski",
    "Ivan Petrov",
];

const SAMPLE_COUNTRIES: [&str; 10] = [
    "Germany",
    "England",
    "Spain",
    "Italy",
    "France",
    "Brazil",
    "Argentina",
    "Netherlands",
    "Belgium",
    "Portugal",
];

/// Inclusive rating range per attribute, in `Attribute::ALL` order.
const SKILL_RANGES: [(u8, u8); 24] = [
    (40, 95), // ball_control
    (30, 90), // dribbling
    (20, 80), // slide_tackle
    (25, 85), // stand_tackle
    (35, 90), // aggression
    (45, 95), // reactions
    (25, 90), // att_position
    (30, 85), // interceptions
    (35, 95), // vision
    (40, 90), // composure
    (25, 85), // crossing
    (45, 95), // short_pass
    (30, 90), // long_pass
    (40, 95), // acceleration
    (55, 95), // stamina
    (45, 90), // strength
    (50, 90), // balance
    (40, 95), // sprint_speed
    (45, 90), // agility
    (35, 85), // jumping
    (30, 85), // heading
    (25, 90), // shot_power
    (20, 90), // finishing
    (25, 85), // long_shots
];

/// Seeded generator of synthetic players for runs without a player file.
pub struct PlayerGenerator {
    rng: StdRng,
    next_id: u32,
}

impl PlayerGenerator {
    pub fn with_seed(seed: u64) -> Self {
        PlayerGenerator {
            rng: StdRng::seed_from_u64(seed),
            next_id: 1,
        }
    }

    pub fn generate(&mut self, club: &str) -> Player {
        let id = self.next_id;
        self.next_id += 1;

        let base_name = SAMPLE_NAMES[self.rng.random_range(0..SAMPLE_NAMES.len())];
        let country = SAMPLE_COUNTRIES[self.rng.random_range(0..SAMPLE_COUNTRIES.len())];
        let age = self.rng.random_range(18..=35u8);
        let value = self.rng.random_range(100..=5000u32) as f64 * 1_000.0;

        Player {
            id,
            name: format!("{} {}", base_name, id),
            country: country.to_string(),
            age,
            club: club.to_string(),
            value: CurrencyValue::new(value, Currency::Usd),
            skills: self.generate_skills(),
        }
    }

    fn generate_skills(&mut self) -> PlayerSkills {
        let mut skills = PlayerSkills::default();

        for (attribute, (min, max)) in Attribute::ALL.iter().zip(SKILL_RANGES) {
            skills.set(*attribute, self.rng.random_range(min..=max) as f32);
        }

        skills
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_players_are_within_ranges() {
        let mut generator = PlayerGenerator::with_seed(1);

        for _ in 0..100 {
            let player = generator.generate("Arsenal");

            assert_eq!(player.club, "Arsenal");
            assert!((18..=35).contains(&player.age));
            assert!(player.value.amount >= 100_000.0 && player.value.amount <= 5_000_000.0);

            for (attribute, (min, max)) in Attribute::ALL.iter().zip(SKILL_RANGES) {
                let value = player.skills.get(*attribute);
                assert!(value >= min as f32 && value <= max as f32, "{}", attribute);
            }
        }
    }

    #[test]
    fn test_ids_are_sequential_and_names_unique() {
        let mut generator = PlayerGenerator::with_seed(2);

        let first = generator.generate("A");
        let second = generator.generate("A");

        assert_eq!(first.id + 1, second.id);
        assert_ne!(first.name, second.name);
    }

    #[test]
    fn test_same_seed_same_players() {
        let mut a = PlayerGenerator::with_seed(3);
        let mut b = PlayerGenerator::with_seed(3);

        assert_eq!(a.generate("A"), b.generate("A"));
    }
}
