use crate::club::player::builder::PlayerBuilder;
use crate::club::player::skills::{AttributeVector, PlayerSkills};
use crate::shared::CurrencyValue;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

pub const UNKNOWN: &str = "Unknown";

/// A rated footballer. Only `club` changes after loading, when a trade executes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub country: String,
    pub age: u8,
    pub club: String,
    pub value: CurrencyValue,
    pub skills: PlayerSkills,
}

impl Player {
    pub fn builder() -> PlayerBuilder {
        PlayerBuilder::new()
    }

    pub fn attribute_vector(&self) -> AttributeVector {
        self.skills.vector()
    }

    pub fn transfer_to(&mut self, club: &str) {
        self.club = club.to_string();
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} ({}, {} years, {})", self.name, self.club, self.age, self.value)
    }
}
