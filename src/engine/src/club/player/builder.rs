use crate::club::player::player::UNKNOWN;
use crate::club::player::skills::{Attribute, PlayerSkills};
use crate::shared::CurrencyValue;
use crate::Player;

// Builder for Player
#[derive(Default)]
pub struct PlayerBuilder {
    id: Option<u32>,
    name: Option<String>,
    country: Option<String>,
    age: Option<u8>,
    club: Option<String>,
    value: Option<CurrencyValue>,
    skills: Option<PlayerSkills>,
}

impl PlayerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn age(mut self, age: u8) -> Self {
        self.age = Some(age);
        self
    }

    pub fn club(mut self, club: impl Into<String>) -> Self {
        self.club = Some(club.into());
        self
    }

    pub fn value(mut self, value: CurrencyValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn skills(mut self, skills: PlayerSkills) -> Self {
        self.skills = Some(skills);
        self
    }

    pub fn skill(mut self, attribute: Attribute, value: f32) -> Self {
        self.skills.get_or_insert_with(PlayerSkills::default).set(attribute, value);
        self
    }

    pub fn build(self) -> Result<Player, String> {
        let name = self.name.unwrap_or_else(|| UNKNOWN.to_string());
        if name.trim().is_empty() {
            return Err("name must not be blank".to_string());
        }

        Ok(Player {
            id: self.id.ok_or("id is required")?,
            name,
            country: non_blank(self.country),
            age: self.age.unwrap_or_default(),
            club: non_blank(self.club),
            value: self.value.unwrap_or_default(),
            skills: self.skills.unwrap_or_default(),
        })
    }
}

fn non_blank(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => UNKNOWN.to_string(),
    }
}
