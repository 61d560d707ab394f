use crate::club::player::{Attribute, AttributeVector};
use crate::error::{NegotiationError, NegotiationResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const POSITION_SLOTS: usize = 30;

const BUYER_WEIGHTS: [f64; 24] = [
    2.5, 2.3, 0.5, 0.7, 1.0, 1.8, 2.8, 1.2, 2.4, 2.0, 1.5, 2.2, 1.8, 2.1, 1.9, 1.4, 1.7, 2.0,
    2.2, 1.3, 1.4, 2.6, 2.9, 2.1,
];

const SELLER_WEIGHTS: [f64; 24] = [
    1.9, 1.5, 2.5, 2.7, 1.8, 2.0, 1.2, 2.6, 1.7, 1.8, 1.0, 2.1, 1.9, 1.8, 2.4, 2.2, 1.6, 1.7,
    1.5, 1.9, 2.3, 1.4, 1.1, 1.3,
];

const BASE_WEIGHTS: [f64; 24] = [
    1.5, 1.5, 1.5, 1.5, 1.0, 1.5, 1.5, 1.5, 1.5, 1.5, 1.2, 1.5, 1.3, 1.5, 1.8, 1.5, 1.5, 1.5,
    1.5, 1.3, 1.3, 1.5, 1.5, 1.3,
];

const BUYER_POSITIONS: [f64; POSITION_SLOTS] = [
    1.8, 1.8, 1.7, 1.7, 1.6, 1.5, 1.4, 1.3, 1.2, 1.1, 1.0, 0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3,
    0.2, 0.1, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05,
];

const SELLER_POSITIONS: [f64; POSITION_SLOTS] = [
    2.9, 2.8, 2.7, 2.6, 2.5, 2.4, 2.3, 2.2, 2.1, 2.0, 1.9, 1.8, 1.7, 1.6, 1.5, 1.4, 1.3, 1.2,
    1.1, 1.0, 0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1, 0.05,
];

/// Preset negotiation strategies. Buyer and Seller carry their own weight tables, the
/// others scale a shared base table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClubStrategy {
    Buyer,
    Seller,
    Balanced,
    Offensive,
    Defensive,
    Technical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionPreference {
    Any,
    Defence,
    Midfield,
    Attack,
}

impl PositionPreference {
    fn favoured_slots(&self) -> Option<std::ops::Range<usize>> {
        match self {
            PositionPreference::Any => None,
            PositionPreference::Defence => Some(0..10),
            PositionPreference::Midfield => Some(10..20),
            PositionPreference::Attack => Some(20..30),
        }
    }
}

impl ClubStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            ClubStrategy::Buyer => "buyer",
            ClubStrategy::Seller => "seller",
            ClubStrategy::Balanced => "balanced",
            ClubStrategy::Offensive => "offensive",
            ClubStrategy::Defensive => "defensive",
            ClubStrategy::Technical => "technical",
        }
    }

    fn multipliers(&self) -> &'static [(Attribute, f64)] {
        match self {
            ClubStrategy::Offensive => &[
                (Attribute::Finishing, 1.8),
                (Attribute::ShotPower, 1.6),
                (Attribute::AttPosition, 1.7),
                (Attribute::Dribbling, 1.5),
                (Attribute::Acceleration, 1.5),
                (Attribute::SprintSpeed, 1.4),
                (Attribute::Agility, 1.4),
                (Attribute::BallControl, 1.3),
                (Attribute::LongShots, 1.3),
            ],
            ClubStrategy::Defensive => &[
                (Attribute::SlideTackle, 1.8),
                (Attribute::StandTackle, 1.8),
                (Attribute::Interceptions, 1.7),
                (Attribute::Heading, 1.6),
                (Attribute::Strength, 1.5),
                (Attribute::Stamina, 1.5),
                (Attribute::Jumping, 1.4),
                (Attribute::Aggression, 1.3),
                (Attribute::Reactions, 1.3),
            ],
            ClubStrategy::Technical => &[
                (Attribute::BallControl, 1.8),
                (Attribute::Vision, 1.8),
                (Attribute::ShortPass, 1.7),
                (Attribute::LongPass, 1.6),
                (Attribute::Composure, 1.6),
                (Attribute::Dribbling, 1.5),
                (Attribute::Crossing, 1.4),
                (Attribute::Agility, 1.3),
                (Attribute::Balance, 1.3),
            ],
            _ => &[],
        }
    }

    pub fn position_preference(&self) -> PositionPreference {
        match self {
            ClubStrategy::Offensive => PositionPreference::Attack,
            ClubStrategy::Defensive => PositionPreference::Defence,
            ClubStrategy::Technical => PositionPreference::Midfield,
            _ => PositionPreference::Any,
        }
    }

    /// Preferred average squad age, `None` defers to the utility config.
    pub fn ideal_age(&self) -> Option<f64> {
        match self {
            ClubStrategy::Offensive => Some(24.0),
            ClubStrategy::Defensive => Some(29.0),
            _ => None,
        }
    }

    pub fn profile(&self) -> WeightProfile {
        let (raw, positions) = match self {
            ClubStrategy::Buyer => (BUYER_WEIGHTS, BUYER_POSITIONS.to_vec()),
            ClubStrategy::Seller => (SELLER_WEIGHTS, SELLER_POSITIONS.to_vec()),
            _ => {
                let mut weights = BASE_WEIGHTS;
                for (attribute, multiplier) in self.multipliers() {
                    weights[attribute.index()] *= multiplier;
                }

                let mut positions = vec![1.0; POSITION_SLOTS];
                if let Some(slots) = self.position_preference().favoured_slots() {
                    for slot in slots {
                        positions[slot] = 1.5;
                    }
                }

                (weights, positions)
            }
        };

        WeightProfile {
            name: self.name().to_string(),
            attribute_weights: normalize(AttributeVector::from_row_slice(&raw)),
            position_weights: positions,
            ideal_age: self.ideal_age(),
        }
    }
}

/// Secret preferences of one club. Attribute weights are normalized so the largest is 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightProfile {
    name: String,
    attribute_weights: AttributeVector,
    position_weights: Vec<f64>,
    ideal_age: Option<f64>,
}

impl WeightProfile {
    pub fn new(
        name: &str,
        raw_weights: AttributeVector,
        position_weights: Vec<f64>,
        ideal_age: Option<f64>,
    ) -> NegotiationResult<Self> {
        let reject = |reason: &str| NegotiationError::InvalidProfile {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if raw_weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(reject("attribute weights must be finite and non-negative"));
        }

        if raw_weights.max() <= 0.0 {
            return Err(reject("at least one attribute weight must be positive"));
        }

        if position_weights.is_empty() {
            return Err(reject("position weights must not be empty"));
        }

        if position_weights.iter().any(|w| !w.is_finite()) {
            return Err(reject("position weights must be finite"));
        }

        if let Some(age) = ideal_age {
            if !age.is_finite() {
                return Err(reject("ideal age must be finite"));
            }
        }

        Ok(WeightProfile {
            name: name.to_string(),
            attribute_weights: normalize(raw_weights),
            position_weights,
            ideal_age,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute_weights(&self) -> &AttributeVector {
        &self.attribute_weights
    }

    pub fn attribute_weight(&self, attribute: Attribute) -> f64 {
        self.attribute_weights[attribute.index()]
    }

    pub fn position_weights(&self) -> &[f64] {
        &self.position_weights
    }

    /// Weight of a squad slot; slots past the table reuse its last entry.
    pub fn position_weight(&self, slot: usize) -> f64 {
        let last = self.position_weights.len() - 1;
        self.position_weights[slot.min(last)]
    }

    pub fn ideal_age(&self) -> Option<f64> {
        self.ideal_age
    }
}

fn normalize(raw: AttributeVector) -> AttributeVector {
    let max = raw.max();
    if max > 0.0 { raw / max } else { raw }
}

/// Per-club profile as it appears in settings: a preset or an explicit weight table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileConfig {
    Preset {
        strategy: ClubStrategy,
    },
    Custom {
        name: String,
        /// Attribute name to raw weight. Missing attributes weigh 1.0.
        attribute_weights: HashMap<String, f64>,
        #[serde(default)]
        position_weights: Option<Vec<f64>>,
        #[serde(default)]
        ideal_age: Option<f64>,
    },
}

impl ProfileConfig {
    pub fn buyer() -> Self {
        ProfileConfig::Preset {
            strategy: ClubStrategy::Buyer,
        }
    }

    pub fn seller() -> Self {
        ProfileConfig::Preset {
            strategy: ClubStrategy::Seller,
        }
    }

    pub fn resolve(&self) -> NegotiationResult<WeightProfile> {
        match self {
            ProfileConfig::Preset { strategy } => Ok(strategy.profile()),
            ProfileConfig::Custom {
                name,
                attribute_weights,
                position_weights,
                ideal_age,
            } => {
                let mut raw = AttributeVector::repeat(1.0);

                for (key, weight) in attribute_weights {
                    let attribute: Attribute = key
                        .parse()
                        .map_err(|_| NegotiationError::UnknownAttribute(key.clone()))?;
                    raw[attribute.index()] = *weight;
                }

                let positions = position_weights
                    .clone()
                    .unwrap_or_else(|| vec![1.0; POSITION_SLOTS]);

                WeightProfile::new(name, raw, positions, *ideal_age)
            }
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        ProfileConfig::Preset {
            strategy: ClubStrategy::Balanced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_presets_are_normalized() {
        for strategy in [
            ClubStrategy::Buyer,
            ClubStrategy::Seller,
            ClubStrategy::Balanced,
            ClubStrategy::Offensive,
            ClubStrategy::Defensive,
            ClubStrategy::Technical,
        ] {
            let profile = strategy.profile();
            let weights = profile.attribute_weights();

            assert!(approx(weights.max(), 1.0), "{}", strategy.name());
            assert!(weights.iter().all(|w| *w >= 0.0 && *w <= 1.0));
            assert_eq!(profile.position_weights().len(), POSITION_SLOTS);
        }
    }

    #[test]
    fn test_buyer_and_seller_favour_different_attributes() {
        let buyer = ClubStrategy::Buyer.profile();
        let seller = ClubStrategy::Seller.profile();

        assert!(approx(buyer.attribute_weight(Attribute::Finishing), 1.0));
        assert!(approx(seller.attribute_weight(Attribute::StandTackle), 1.0));
        assert!(buyer.attribute_weight(Attribute::StandTackle) < 0.3);
        assert!(seller.attribute_weight(Attribute::Finishing) < 0.5);
    }

    #[test]
    fn test_seller_favours_early_slots_more_strongly() {
        let buyer = ClubStrategy::Buyer.profile();
        let seller = ClubStrategy::Seller.profile();

        assert!(seller.position_weight(0) > buyer.position_weight(0));
        assert_eq!(seller.position_weight(29), 0.05);
    }

    #[test]
    fn test_overflow_slots_reuse_last_weight() {
        let profile = ClubStrategy::Buyer.profile();
        assert_eq!(profile.position_weight(45), profile.position_weight(29));
    }

    #[test]
    fn test_strategy_position_preference() {
        let offensive = ClubStrategy::Offensive.profile();
        assert_eq!(offensive.position_weight(0), 1.0);
        assert_eq!(offensive.position_weight(25), 1.5);

        let defensive = ClubStrategy::Defensive.profile();
        assert_eq!(defensive.position_weight(3), 1.5);
        assert_eq!(defensive.ideal_age(), Some(29.0));

        let balanced = ClubStrategy::Balanced.profile();
        assert!(balanced.position_weights().iter().all(|w| *w == 1.0));
        assert_eq!(balanced.ideal_age(), None);
    }

    #[test]
    fn test_offensive_multipliers() {
        let profile = ClubStrategy::Offensive.profile();
        // finishing 1.5 * 1.8 = 2.7 is the maximum
        assert!(approx(profile.attribute_weight(Attribute::Finishing), 1.0));
        assert!(approx(profile.attribute_weight(Attribute::Aggression), 1.0 / 2.7));
    }

    #[test]
    fn test_custom_profile_defaults_missing_attributes() {
        let config = ProfileConfig::Custom {
            name: "scouting".to_string(),
            attribute_weights: HashMap::from([("vision".to_string(), 4.0)]),
            position_weights: None,
            ideal_age: Some(25.0),
        };

        let profile = config.resolve().unwrap();

        assert!(approx(profile.attribute_weight(Attribute::Vision), 1.0));
        assert!(approx(profile.attribute_weight(Attribute::Heading), 0.25));
        assert_eq!(profile.ideal_age(), Some(25.0));
    }

    #[test]
    fn test_custom_profile_rejects_unknown_attribute() {
        let config = ProfileConfig::Custom {
            name: "broken".to_string(),
            attribute_weights: HashMap::from([("curve".to_string(), 2.0)]),
            position_weights: None,
            ideal_age: None,
        };

        assert_eq!(
            config.resolve(),
            Err(NegotiationError::UnknownAttribute("curve".to_string()))
        );
    }

    #[test]
    fn test_invalid_profiles() {
        let zeros = AttributeVector::zeros();
        assert!(WeightProfile::new("zero", zeros, vec![1.0], None).is_err());

        let ones = AttributeVector::repeat(1.0);
        assert!(WeightProfile::new("empty", ones, Vec::new(), None).is_err());

        let mut negative = AttributeVector::repeat(1.0);
        negative[3] = -1.0;
        assert!(WeightProfile::new("negative", negative, vec![1.0], None).is_err());
    }

    #[test]
    fn test_profile_config_from_json() {
        let preset: ProfileConfig =
            serde_json::from_str(r#"{ "kind": "preset", "strategy": "seller" }"#).unwrap();
        assert_eq!(preset, ProfileConfig::seller());

        let custom: ProfileConfig = serde_json::from_str(
            r#"{ "kind": "custom", "name": "x", "attribute_weights": { "finishing": 2.0 } }"#,
        )
        .unwrap();
        assert!(custom.resolve().is_ok());
    }
}
