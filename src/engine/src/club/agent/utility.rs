use crate::club::agent::WeightProfile;
use crate::club::player::Player;
use crate::negotiation::UtilityConfig;
use itertools::Itertools;

/// Scores players and ordered squads against one club's secret profile.
#[derive(Debug, Clone)]
pub struct UtilityEvaluator {
    profile: WeightProfile,
    config: UtilityConfig,
}

impl UtilityEvaluator {
    pub fn new(profile: WeightProfile, config: UtilityConfig) -> Self {
        UtilityEvaluator { profile, config }
    }

    pub fn profile(&self) -> &WeightProfile {
        &self.profile
    }

    pub fn evaluate_player(&self, player: &Player) -> f64 {
        self.profile
            .attribute_weights()
            .dot(&player.attribute_vector())
    }

    pub fn evaluate_squad(&self, squad: &[Player]) -> f64 {
        let positional: f64 = squad
            .iter()
            .enumerate()
            .map(|(slot, player)| self.evaluate_player(player) * self.profile.position_weight(slot))
            .sum();

        positional + self.synergy_bonus(squad) + self.age_bonus(squad)
    }

    /// Rewards neighbouring slots with similar passing and age.
    pub fn synergy_bonus(&self, squad: &[Player]) -> f64 {
        let config = &self.config;

        let total: f64 = squad
            .iter()
            .tuple_windows()
            .map(|(a, b)| {
                let pass_gap = (a.skills.short_pass as f64 - b.skills.short_pass as f64).abs();
                let age_gap = (a.age as f64 - b.age as f64).abs();

                let pass = (config.max_pass_synergy
                    - pass_gap / config.pass_synergy_threshold * config.max_pass_synergy)
                    .max(0.0);
                let age = (config.max_age_synergy - age_gap / config.age_synergy_divisor).max(0.0);

                pass + age
            })
            .sum();

        total * config.synergy_weight
    }

    pub fn age_bonus(&self, squad: &[Player]) -> f64 {
        if squad.is_empty() {
            return 0.0;
        }

        let config = &self.config;
        let ideal = self.profile.ideal_age().unwrap_or(config.ideal_average_age);

        let average = squad.iter().map(|p| p.age as f64).sum::<f64>() / squad.len() as f64;
        let penalty = (average - ideal).abs() * config.age_penalty_per_year;

        (config.max_age_bonus - penalty).max(0.0) * config.age_bonus_weight
    }
}
