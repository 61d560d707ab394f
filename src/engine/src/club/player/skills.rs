use nalgebra::SVector;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

pub const ATTRIBUTE_COUNT: usize = 24;

pub type AttributeVector = SVector<f64, ATTRIBUTE_COUNT>;

/// Skill attributes in the fixed order shared by every weight profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    BallControl,
    Dribbling,
    SlideTackle,
    StandTackle,
    Aggression,
    Reactions,
    AttPosition,
    Interceptions,
    Vision,
    Composure,
    Crossing,
    ShortPass,
    LongPass,
    Acceleration,
    Stamina,
    Strength,
    Balance,
    SprintSpeed,
    Agility,
    Jumping,
    Heading,
    ShotPower,
    Finishing,
    LongShots,
}

impl Attribute {
    pub const ALL: [Attribute; ATTRIBUTE_COUNT] = [
        Attribute::BallControl,
        Attribute::Dribbling,
        Attribute::SlideTackle,
        Attribute::StandTackle,
        Attribute::Aggression,
        Attribute::Reactions,
        Attribute::AttPosition,
        Attribute::Interceptions,
        Attribute::Vision,
        Attribute::Composure,
        Attribute::Crossing,
        Attribute::ShortPass,
        Attribute::LongPass,
        Attribute::Acceleration,
        Attribute::Stamina,
        Attribute::Strength,
        Attribute::Balance,
        Attribute::SprintSpeed,
        Attribute::Agility,
        Attribute::Jumping,
        Attribute::Heading,
        Attribute::ShotPower,
        Attribute::Finishing,
        Attribute::LongShots,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::BallControl => "ball_control",
            Attribute::Dribbling => "dribbling",
            Attribute::SlideTackle => "slide_tackle",
            Attribute::StandTackle => "stand_tackle",
            Attribute::Aggression => "aggression",
            Attribute::Reactions => "reactions",
            Attribute::AttPosition => "att_position",
            Attribute::Interceptions => "interceptions",
            Attribute::Vision => "vision",
            Attribute::Composure => "composure",
            Attribute::Crossing => "crossing",
            Attribute::ShortPass => "short_pass",
            Attribute::LongPass => "long_pass",
            Attribute::Acceleration => "acceleration",
            Attribute::Stamina => "stamina",
            Attribute::Strength => "strength",
            Attribute::Balance => "balance",
            Attribute::SprintSpeed => "sprint_speed",
            Attribute::Agility => "agility",
            Attribute::Jumping => "jumping",
            Attribute::Heading => "heading",
            Attribute::ShotPower => "shot_power",
            Attribute::Finishing => "finishing",
            Attribute::LongShots => "long_shots",
        }
    }
}

impl FromStr for Attribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();

        Attribute::ALL
            .iter()
            .find(|attribute| attribute.name().eq_ignore_ascii_case(needle))
            .copied()
            .ok_or_else(|| format!("unknown attribute: {}", needle))
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name())
    }
}

/// The 24 rated skills, nominally 0-100. Values are not clamped.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSkills {
    // ball play
    pub ball_control: f32,
    pub dribbling: f32,
    // defending
    pub slide_tackle: f32,
    pub stand_tackle: f32,
    pub aggression: f32,
    pub reactions: f32,
    pub att_position: f32,
    pub interceptions: f32,
    pub vision: f32,
    pub composure: f32,
    // passing
    pub crossing: f32,
    pub short_pass: f32,
    pub long_pass: f32,
    // physical
    pub acceleration: f32,
    pub stamina: f32,
    pub strength: f32,
    pub balance: f32,
    pub sprint_speed: f32,
    pub agility: f32,
    pub jumping: f32,
    // shooting
    pub heading: f32,
    pub shot_power: f32,
    pub finishing: f32,
    pub long_shots: f32,
}

impl PlayerSkills {
    pub fn get(&self, attribute: Attribute) -> f32 {
        match attribute {
            Attribute::BallControl => self.ball_control,
            Attribute::Dribbling => self.dribbling,
            Attribute::SlideTackle => self.slide_tackle,
            Attribute::StandTackle => self.stand_tackle,
            Attribute::Aggression => self.aggression,
            Attribute::Reactions => self.reactions,
            Attribute::AttPosition => self.att_position,
            Attribute::Interceptions => self.interceptions,
            Attribute::Vision => self.vision,
            Attribute::Composure => self.composure,
            Attribute::Crossing => self.crossing,
            Attribute::ShortPass => self.short_pass,
            Attribute::LongPass => self.long_pass,
            Attribute::Acceleration => self.acceleration,
            Attribute::Stamina => self.stamina,
            Attribute::Strength => self.strength,
            Attribute::Balance => self.balance,
            Attribute::SprintSpeed => self.sprint_speed,
            Attribute::Agility => self.agility,
            Attribute::Jumping => self.jumping,
            Attribute::Heading => self.heading,
            Attribute::ShotPower => self.shot_power,
            Attribute::Finishing => self.finishing,
            Attribute::LongShots => self.long_shots,
        }
    }

    pub fn set(&mut self, attribute: Attribute, value: f32) {
        let slot = match attribute {
            Attribute::BallControl => &mut self.ball_control,
            Attribute::Dribbling => &mut self.dribbling,
            Attribute::SlideTackle => &mut self.slide_tackle,
            Attribute::StandTackle => &mut self.stand_tackle,
            Attribute::Aggression => &mut self.aggression,
            Attribute::Reactions => &mut self.reactions,
            Attribute::AttPosition => &mut self.att_position,
            Attribute::Interceptions => &mut self.interceptions,
            Attribute::Vision => &mut self.vision,
            Attribute::Composure => &mut self.composure,
            Attribute::Crossing => &mut self.crossing,
            Attribute::ShortPass => &mut self.short_pass,
            Attribute::LongPass => &mut self.long_pass,
            Attribute::Acceleration => &mut self.acceleration,
            Attribute::Stamina => &mut self.stamina,
            Attribute::Strength => &mut self.strength,
            Attribute::Balance => &mut self.balance,
            Attribute::SprintSpeed => &mut self.sprint_speed,
            Attribute::Agility => &mut self.agility,
            Attribute::Jumping => &mut self.jumping,
            Attribute::Heading => &mut self.heading,
            Attribute::ShotPower => &mut self.shot_power,
            Attribute::Finishing => &mut self.finishing,
            Attribute::LongShots => &mut self.long_shots,
        };

        *slot = value;
    }

    pub fn uniform(value: f32) -> Self {
        let mut skills = PlayerSkills::default();

        for attribute in Attribute::ALL {
            skills.set(attribute, value);
        }

        skills
    }

    /// Skills in `Attribute::ALL` order.
    pub fn vector(&self) -> AttributeVector {
        AttributeVector::from_fn(|i, _| self.get(Attribute::ALL[i]) as f64)
    }

    pub fn average(&self) -> f32 {
        self.vector().mean() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_order_matches_index() {
        for (i, attribute) in Attribute::ALL.iter().enumerate() {
            assert_eq!(attribute.index(), i);
        }

        assert_eq!(Attribute::ALL[0].name(), "ball_control");
        assert_eq!(Attribute::ALL[23].name(), "long_shots");
    }

    #[test]
    fn test_attribute_from_str() {
        assert_eq!("finishing".parse::<Attribute>(), Ok(Attribute::Finishing));
        assert_eq!(" Stand_Tackle ".parse::<Attribute>(), Ok(Attribute::StandTackle));
        assert!("curve".parse::<Attribute>().is_err());
    }

    #[test]
    fn test_vector_follows_attribute_order() {
        let mut skills = PlayerSkills::default();
        skills.set(Attribute::Finishing, 90.0);
        skills.set(Attribute::BallControl, 10.0);

        let vector = skills.vector();

        assert_eq!(vector[0], 10.0);
        assert_eq!(vector[Attribute::Finishing.index()], 90.0);
        assert_eq!(vector.sum(), 100.0);
    }

    #[test]
    fn test_average() {
        let skills = PlayerSkills::uniform(60.0);
        assert_eq!(skills.average(), 60.0);
    }
}
