use crate::club::agent::ProfileConfig;
use crate::error::{NegotiationError, NegotiationResult};
use serde::{Deserialize, Serialize};

/// How the mediator mutates the squads each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStrategy {
    /// One player from each club changes sides.
    #[default]
    Exchange,
    /// Squads stay with their clubs and only the lineup order is reshuffled.
    Lineup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    pub initial_temperature: f64,
    pub min_acceptance_rate: f64,
    pub max_iterations: u64,
    pub calibration_iterations: u64,
    pub min_temperature: f64,
    pub fallback_temperature: f64,
    pub min_calibration_rate: f64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        AnnealingConfig {
            initial_temperature: 50.0,
            min_acceptance_rate: 0.8,
            max_iterations: 10_000,
            calibration_iterations: 1_000,
            min_temperature: 0.01,
            fallback_temperature: 10.0,
            min_calibration_rate: 0.1,
        }
    }
}

impl AnnealingConfig {
    pub fn validate(&self) -> NegotiationResult<()> {
        if self.calibration_iterations == 0 {
            return invalid("calibration_iterations must be positive");
        }

        if self.max_iterations <= self.calibration_iterations {
            return invalid("max_iterations must exceed calibration_iterations");
        }

        if !in_unit_interval(self.min_acceptance_rate) {
            return invalid("min_acceptance_rate must be in (0, 1]");
        }

        if !in_unit_interval(self.min_calibration_rate) {
            return invalid("min_calibration_rate must be in (0, 1]");
        }

        if !(self.min_temperature > 0.0 && self.min_temperature.is_finite()) {
            return invalid("min_temperature must be positive");
        }

        if !(self.fallback_temperature > 0.0 && self.fallback_temperature.is_finite()) {
            return invalid("fallback_temperature must be positive");
        }

        if !(self.initial_temperature > 0.0 && self.initial_temperature.is_finite()) {
            return invalid("initial_temperature must be positive");
        }

        Ok(())
    }
}

/// Tuning constants for the synergy and age terms of squad utility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilityConfig {
    pub synergy_weight: f64,
    pub max_pass_synergy: f64,
    pub pass_synergy_threshold: f64,
    pub max_age_synergy: f64,
    pub age_synergy_divisor: f64,
    pub age_bonus_weight: f64,
    pub ideal_average_age: f64,
    pub age_penalty_per_year: f64,
    pub max_age_bonus: f64,
}

impl Default for UtilityConfig {
    fn default() -> Self {
        UtilityConfig {
            synergy_weight: 10.0,
            max_pass_synergy: 10.0,
            pass_synergy_threshold: 10.0,
            max_age_synergy: 5.0,
            age_synergy_divisor: 3.0,
            age_bonus_weight: 1.0,
            ideal_average_age: 27.0,
            age_penalty_per_year: 2.0,
            max_age_bonus: 100.0,
        }
    }
}

impl UtilityConfig {
    pub fn validate(&self) -> NegotiationResult<()> {
        if self.pass_synergy_threshold <= 0.0 {
            return invalid("pass_synergy_threshold must be positive");
        }

        if self.age_synergy_divisor <= 0.0 {
            return invalid("age_synergy_divisor must be positive");
        }

        let all_finite = [
            self.synergy_weight,
            self.max_pass_synergy,
            self.max_age_synergy,
            self.age_bonus_weight,
            self.ideal_average_age,
            self.age_penalty_per_year,
            self.max_age_bonus,
        ]
        .iter()
        .all(|v| v.is_finite());

        if !all_finite {
            return invalid("utility constants must be finite");
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegotiationConfig {
    pub max_rounds: u64,
    pub strategy: ProposalStrategy,
    /// Share of lineup rounds that shuffle instead of swap.
    pub team_shuffle_frequency: f64,
    /// Share of slots a shuffle touches.
    pub shuffle_percentage: f64,
    pub progress_interval_swaps: u64,
    pub progress_interval_rounds: u64,
    /// Number of players listed per squad in a progress snapshot.
    pub excerpt_size: usize,
    pub seed: Option<u64>,
    pub buyer_profile: ProfileConfig,
    pub seller_profile: ProfileConfig,
    pub annealing: AnnealingConfig,
    pub utility: UtilityConfig,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        NegotiationConfig {
            max_rounds: 15_000,
            strategy: ProposalStrategy::default(),
            team_shuffle_frequency: 0.01,
            shuffle_percentage: 0.2,
            progress_interval_swaps: 250,
            progress_interval_rounds: 2_000,
            excerpt_size: 3,
            seed: None,
            buyer_profile: ProfileConfig::buyer(),
            seller_profile: ProfileConfig::seller(),
            annealing: AnnealingConfig::default(),
            utility: UtilityConfig::default(),
        }
    }
}

impl NegotiationConfig {
    pub fn validate(&self) -> NegotiationResult<()> {
        if !(self.team_shuffle_frequency >= 0.0 && self.team_shuffle_frequency <= 1.0) {
            return invalid("team_shuffle_frequency must be in [0, 1]");
        }

        if !in_unit_interval(self.shuffle_percentage) {
            return invalid("shuffle_percentage must be in (0, 1]");
        }

        self.annealing.validate()?;
        self.utility.validate()?;

        Ok(())
    }

    /// Rounds between two shuffles, `None` when shuffles are disabled.
    pub fn shuffle_period(&self) -> Option<u64> {
        if self.team_shuffle_frequency <= 0.0 {
            return None;
        }

        Some(((1.0 / self.team_shuffle_frequency).round() as u64).max(1))
    }
}

fn in_unit_interval(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

fn invalid(reason: &str) -> NegotiationResult<()> {
    Err(NegotiationError::InvalidConfig(reason.to_string()))
}
