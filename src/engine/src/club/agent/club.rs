use crate::club::agent::{AnnealingController, UtilityEvaluator, WeightProfile};
use crate::club::player::Player;
use crate::negotiation::{AnnealingConfig, UtilityConfig};
use rand::rngs::StdRng;

/// One side of the negotiation. Buyer, seller and any other club differ only by profile.
#[derive(Debug, Clone)]
pub struct NegotiatingClub {
    name: String,
    squad: Vec<Player>,
    evaluator: UtilityEvaluator,
    annealing: AnnealingController,
}

impl NegotiatingClub {
    pub fn new(
        name: &str,
        squad: Vec<Player>,
        profile: WeightProfile,
        utility: UtilityConfig,
        annealing: AnnealingConfig,
    ) -> Self {
        NegotiatingClub {
            name: name.to_string(),
            squad,
            evaluator: UtilityEvaluator::new(profile, utility),
            annealing: AnnealingController::new(annealing),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn squad(&self) -> &[Player] {
        &self.squad
    }

    pub fn profile_name(&self) -> &str {
        self.evaluator.profile().name()
    }

    pub fn annealing(&self) -> &AnnealingController {
        &self.annealing
    }

    pub fn evaluate(&self, player: &Player) -> f64 {
        self.evaluator.evaluate_player(player)
    }

    pub fn evaluate_squad(&self, squad: &[Player]) -> f64 {
        self.evaluator.evaluate_squad(squad)
    }

    /// Utility of the squad the club currently holds.
    pub fn utility(&self) -> f64 {
        self.evaluator.evaluate_squad(&self.squad)
    }

    pub fn vote(&mut self, current: &[Player], proposed: &[Player], rng: &mut StdRng) -> bool {
        let current_utility = self.evaluator.evaluate_squad(current);
        let proposed_utility = self.evaluator.evaluate_squad(proposed);

        self.annealing.decide(current_utility, proposed_utility, rng)
    }

    /// Vote on replacing the held squad with `proposed`.
    pub fn vote_on(&mut self, proposed: &[Player], rng: &mut StdRng) -> bool {
        let current_utility = self.evaluator.evaluate_squad(&self.squad);
        let proposed_utility = self.evaluator.evaluate_squad(proposed);

        self.annealing.decide(current_utility, proposed_utility, rng)
    }

    pub fn player(&self, player_id: u32) -> Option<&Player> {
        self.squad.iter().find(|p| p.id == player_id)
    }

    pub fn contains(&self, player_id: u32) -> bool {
        self.player(player_id).is_some()
    }

    /// The squad in the slot order given by `order`, a permutation of slot indices.
    pub fn arranged(&self, order: &[usize]) -> Vec<Player> {
        order
            .iter()
            .filter_map(|&slot| self.squad.get(slot))
            .cloned()
            .collect()
    }

    pub fn rearrange(&mut self, order: &[usize]) {
        if order.len() == self.squad.len() {
            self.squad = self.arranged(order);
        }
    }

    /// The squad after giving away `outgoing` and signing `incoming` at the end.
    pub fn with_exchange(&self, outgoing: u32, incoming: &Player) -> Option<Vec<Player>> {
        let position = self.squad.iter().position(|p| p.id == outgoing)?;

        let mut squad = self.squad.clone();
        squad.remove(position);
        squad.push(incoming.clone());

        Some(squad)
    }

    pub fn release(&mut self, player_id: u32) -> Option<Player> {
        let position = self.squad.iter().position(|p| p.id == player_id)?;
        Some(self.squad.remove(position))
    }

    pub fn sign(&mut self, mut player: Player) {
        player.transfer_to(&self.name);
        self.squad.push(player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::agent::ClubStrategy;
    use crate::club::player::PlayerSkills;
    use rand::SeedableRng;

    fn player(id: u32, club: &str, level: f32) -> Player {
        Player::builder()
            .id(id)
            .name(format!("Player {}", id))
            .club(club)
            .age(27)
            .skills(PlayerSkills::uniform(level))
            .build()
            .unwrap()
    }

    fn club(name: &str, strategy: ClubStrategy, squad: Vec<Player>) -> NegotiatingClub {
        NegotiatingClub::new(
            name,
            squad,
            strategy.profile(),
            UtilityConfig::default(),
            AnnealingConfig::default(),
        )
    }

    #[test]
    fn test_with_exchange_does_not_touch_live_squad() {
        let club = club(
            "Liverpool",
            ClubStrategy::Seller,
            vec![player(1, "Liverpool", 50.0), player(2, "Liverpool", 60.0)],
        );

        let incoming = player(9, "River Plate", 70.0);
        let squad = club.with_exchange(1, &incoming).unwrap();

        assert_eq!(squad.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 9]);
        assert_eq!(club.squad().len(), 2);
        assert!(club.contains(1));
        assert!(club.with_exchange(42, &incoming).is_none());
    }

    #[test]
    fn test_release_and_sign() {
        let mut club = club(
            "Liverpool",
            ClubStrategy::Seller,
            vec![player(1, "Liverpool", 50.0), player(2, "Liverpool", 60.0)],
        );

        let released = club.release(1).unwrap();
        assert_eq!(released.id, 1);
        assert!(club.release(1).is_none());

        club.sign(player(9, "River Plate", 70.0));

        let signed = club.squad().last().unwrap();
        assert_eq!(signed.id, 9);
        assert_eq!(signed.club, "Liverpool");
    }

    #[test]
    fn test_rearrange() {
        let mut club = club(
            "River Plate",
            ClubStrategy::Buyer,
            (1..=3)
                .map(|id| player(id, "River Plate", 40.0 + 10.0 * id as f32))
                .collect(),
        );

        club.rearrange(&[2, 0, 1]);
        assert_eq!(club.squad().iter().map(|p| p.id).collect::<Vec<_>>(), vec![3, 1, 2]);

        club.rearrange(&[0]);
        assert_eq!(club.squad().len(), 3);
    }

    #[test]
    fn test_vote_accepts_strict_improvement() {
        let weak = vec![player(1, "Liverpool", 40.0)];
        let strong = vec![player(2, "Liverpool", 80.0)];
        let mut club = club("Liverpool", ClubStrategy::Seller, weak.clone());
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..100 {
            assert!(club.vote(&weak, &strong, &mut rng));
        }

        assert_eq!(club.annealing().iteration(), 100);
    }

    #[test]
    fn test_profiles_stay_private_to_each_club() {
        let squad = vec![player(1, "A", 50.0)];
        let buyer = club("A", ClubStrategy::Buyer, squad.clone());
        let seller = club("B", ClubStrategy::Seller, squad.clone());

        assert_eq!(buyer.profile_name(), "buyer");
        assert_eq!(seller.profile_name(), "seller");
        assert_ne!(buyer.evaluate(&squad[0]), seller.evaluate(&squad[0]));
    }
}
