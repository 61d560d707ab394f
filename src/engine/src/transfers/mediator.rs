use crate::club::agent::NegotiatingClub;
use crate::club::player::Player;
use crate::transfers::{
    ExchangeOffer, MoveKind, OfferedPlayer, Proposal, Side, TradeLog, TradeRecord, Votes,
};
use log::{debug, warn};
use rand::RngExt;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Generates candidate moves and keeps the trade log. Proposals never touch the clubs;
/// only `settle_exchange` does, after both sides voted.
#[derive(Debug, Clone)]
pub struct Mediator {
    shuffle_percentage: f64,
    trade_log: TradeLog,
}

impl Mediator {
    pub fn new(buyer_club: &str, seller_club: &str, shuffle_percentage: f64) -> Self {
        Mediator {
            shuffle_percentage,
            trade_log: TradeLog::new(buyer_club, seller_club),
        }
    }

    pub fn trade_log(&self) -> &TradeLog {
        &self.trade_log
    }

    pub fn into_trade_log(self) -> TradeLog {
        self.trade_log
    }

    /// Swaps two slots of one squad; the other squad keeps its order.
    pub fn propose_swap(
        &self,
        buyer_size: usize,
        seller_size: usize,
        rng: &mut StdRng,
    ) -> Proposal {
        let mut buyer_order = identity(buyer_size);
        let mut seller_order = identity(seller_size);

        let eligible: Vec<Side> = [(Side::Buyer, buyer_size), (Side::Seller, seller_size)]
            .into_iter()
            .filter(|(_, size)| *size > 1)
            .map(|(side, _)| side)
            .collect();

        if !eligible.is_empty() {
            let side = eligible[rng.random_range(0..eligible.len())];
            let order = match side {
                Side::Buyer => &mut buyer_order,
                Side::Seller => &mut seller_order,
            };

            let first = rng.random_range(0..order.len());
            let mut second = rng.random_range(0..order.len() - 1);
            if second >= first {
                second += 1;
            }

            order.swap(first, second);
        }

        Proposal::Lineup {
            kind: MoveKind::Swap,
            buyer_order,
            seller_order,
        }
    }

    /// Permutes a random share of slots within each squad. Every squad with more than
    /// one player is shuffled with probability one half, and at least one always is.
    pub fn propose_shuffle(
        &self,
        buyer_size: usize,
        seller_size: usize,
        rng: &mut StdRng,
    ) -> Proposal {
        let eligible = (buyer_size > 1, seller_size > 1);
        let mut shuffle_buyer = eligible.0 && rng.random_bool(0.5);
        let mut shuffle_seller = eligible.1 && rng.random_bool(0.5);

        if !shuffle_buyer && !shuffle_seller {
            match eligible {
                (true, true) => {
                    if rng.random_bool(0.5) {
                        shuffle_buyer = true;
                    } else {
                        shuffle_seller = true;
                    }
                }
                (true, false) => shuffle_buyer = true,
                (false, true) => shuffle_seller = true,
                (false, false) => {}
            }
        }

        let buyer_order = if shuffle_buyer {
            self.partial_shuffle(buyer_size, rng)
        } else {
            identity(buyer_size)
        };

        let seller_order = if shuffle_seller {
            self.partial_shuffle(seller_size, rng)
        } else {
            identity(seller_size)
        };

        Proposal::Lineup {
            kind: MoveKind::Shuffle,
            buyer_order,
            seller_order,
        }
    }

    /// Picks one player from each squad to swap clubs. `None` if either squad is empty.
    pub fn propose_exchange(
        &self,
        buyer_squad: &[Player],
        seller_squad: &[Player],
        rng: &mut StdRng,
    ) -> Option<Proposal> {
        if buyer_squad.is_empty() || seller_squad.is_empty() {
            return None;
        }

        let buyer_player = &buyer_squad[rng.random_range(0..buyer_squad.len())];
        let seller_player = &seller_squad[rng.random_range(0..seller_squad.len())];

        Some(Proposal::Exchange(ExchangeOffer {
            buyer_player: buyer_player.id,
            seller_player: seller_player.id,
        }))
    }

    /// Logs the decision on `offer` and moves both players when the vote was unanimous.
    /// Returns whether the trade was executed.
    pub fn settle_exchange(
        &mut self,
        round: u64,
        offer: ExchangeOffer,
        votes: Votes,
        buyer: &mut NegotiatingClub,
        seller: &mut NegotiatingClub,
    ) -> bool {
        let buyer_player = find(buyer, offer.buyer_player);
        let seller_player = find(seller, offer.seller_player);
        let consistent = buyer_player.is_some() && seller_player.is_some();

        if !consistent {
            warn!(
                "round {}: exchange of players {} and {} rejected, player missing from {} or {}",
                round,
                offer.buyer_player,
                offer.seller_player,
                buyer.name(),
                seller.name()
            );
        }

        let buyer_player =
            buyer_player.unwrap_or_else(|| OfferedPlayer::missing(offer.buyer_player));
        let seller_player =
            seller_player.unwrap_or_else(|| OfferedPlayer::missing(offer.seller_player));

        let executed = consistent && votes.unanimous();

        if executed {
            if let (Some(outgoing), Some(incoming)) = (
                buyer.release(offer.buyer_player),
                seller.release(offer.seller_player),
            ) {
                debug!(
                    "round {}: {} moves {} -> {}, {} moves {} -> {}",
                    round,
                    outgoing.name,
                    buyer.name(),
                    seller.name(),
                    incoming.name,
                    seller.name(),
                    buyer.name()
                );

                seller.sign(outgoing);
                buyer.sign(incoming);
            }
        }

        self.trade_log.push(TradeRecord {
            round,
            buyer_player,
            seller_player,
            buyer_accepted: votes.buyer,
            seller_accepted: votes.seller,
            executed,
        });

        executed
    }

    fn partial_shuffle(&self, size: usize, rng: &mut StdRng) -> Vec<usize> {
        let mut order = identity(size);
        if size < 2 {
            return order;
        }

        let count = ((size as f64 * self.shuffle_percentage).floor() as usize).clamp(2, size);

        let mut slots = identity(size);
        slots.shuffle(rng);
        slots.truncate(count);

        let mut contents: Vec<usize> = slots.iter().map(|&slot| order[slot]).collect();
        contents.shuffle(rng);

        for (&slot, content) in slots.iter().zip(contents) {
            order[slot] = content;
        }

        order
    }
}

fn identity(size: usize) -> Vec<usize> {
    (0..size).collect()
}

fn find(club: &NegotiatingClub, player_id: u32) -> Option<OfferedPlayer> {
    club.player(player_id).map(OfferedPlayer::from_player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::agent::ClubStrategy;
    use crate::negotiation::{AnnealingConfig, UtilityConfig};
    use crate::transfers::{validate_roster, validate_squads};
    use rand::SeedableRng;

    fn squad(club: &str, ids: std::ops::Range<u32>) -> Vec<Player> {
        ids.map(|id| {
            Player::builder()
                .id(id)
                .name(format!("Player {}", id))
                .club(club)
                .age(25)
                .build()
                .unwrap()
        })
        .collect()
    }

    fn club(name: &str, strategy: ClubStrategy, ids: std::ops::Range<u32>) -> NegotiatingClub {
        NegotiatingClub::new(
            name,
            squad(name, ids),
            strategy.profile(),
            UtilityConfig::default(),
            AnnealingConfig::default(),
        )
    }

    fn moved_slots(order: &[usize]) -> usize {
        order.iter().enumerate().filter(|(i, v)| *i != **v).count()
    }

    #[test]
    fn test_swap_changes_exactly_one_squad() {
        let mediator = Mediator::new("A", "B", 0.2);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..200 {
            let proposal = mediator.propose_swap(11, 14, &mut rng);
            let buyer = proposal.order(Side::Buyer).unwrap();
            let seller = proposal.order(Side::Seller).unwrap();

            assert!(validate_squads(buyer, 11, seller, 14).is_ok());
            assert_eq!(moved_slots(buyer) + moved_slots(seller), 2);
        }
    }

    #[test]
    fn test_swap_prefers_side_with_more_than_one_player() {
        let mediator = Mediator::new("A", "B", 0.2);
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..50 {
            let proposal = mediator.propose_swap(1, 5, &mut rng);
            assert_eq!(moved_slots(proposal.order(Side::Seller).unwrap()), 2);
        }

        let proposal = mediator.propose_swap(1, 1, &mut rng);
        assert_eq!(proposal.order(Side::Buyer), Some(&[0][..]));
        assert_eq!(proposal.order(Side::Seller), Some(&[0][..]));
    }

    #[test]
    fn test_shuffle_keeps_permutation_and_moves_something() {
        let mediator = Mediator::new("A", "B", 0.2);
        let mut rng = StdRng::seed_from_u64(3);

        let mut changed = 0;
        for _ in 0..200 {
            let proposal = mediator.propose_shuffle(20, 20, &mut rng);
            let buyer = proposal.order(Side::Buyer).unwrap();
            let seller = proposal.order(Side::Seller).unwrap();

            assert_eq!(proposal.kind(), MoveKind::Shuffle);
            assert!(validate_squads(buyer, 20, seller, 20).is_ok());
            // at most 4 slots (20% of 20) per side are touched
            assert!(moved_slots(buyer) <= 4 && moved_slots(seller) <= 4);

            if moved_slots(buyer) + moved_slots(seller) > 0 {
                changed += 1;
            }
        }

        assert!(changed > 100);
    }

    #[test]
    fn test_shuffle_with_single_eligible_side() {
        let mediator = Mediator::new("A", "B", 0.5);
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..50 {
            let proposal = mediator.propose_shuffle(0, 6, &mut rng);
            assert_eq!(proposal.order(Side::Buyer).map(|o| o.len()), Some(0));
            assert!(validate_squads(&[], 0, proposal.order(Side::Seller).unwrap(), 6).is_ok());
        }
    }

    #[test]
    fn test_exchange_picks_one_player_from_each_club() {
        let mediator = Mediator::new("A", "B", 0.2);
        let mut rng = StdRng::seed_from_u64(5);
        let buyer = squad("A", 0..5);
        let seller = squad("B", 100..103);

        for _ in 0..50 {
            match mediator.propose_exchange(&buyer, &seller, &mut rng) {
                Some(Proposal::Exchange(offer)) => {
                    assert!(offer.buyer_player < 5);
                    assert!((100..103).contains(&offer.seller_player));
                }
                other => panic!("unexpected proposal {:?}", other),
            }
        }

        assert!(mediator.propose_exchange(&[], &seller, &mut rng).is_none());
    }

    #[test]
    fn test_settle_exchange_moves_players_on_mutual_consent() {
        let mut mediator = Mediator::new("A", "B", 0.2);
        let mut buyer = club("A", ClubStrategy::Buyer, 0..3);
        let mut seller = club("B", ClubStrategy::Seller, 10..13);

        let offer = ExchangeOffer {
            buyer_player: 1,
            seller_player: 12,
        };

        let executed = mediator.settle_exchange(
            7,
            offer,
            Votes {
                buyer: true,
                seller: true,
            },
            &mut buyer,
            &mut seller,
        );

        assert!(executed);
        assert!(buyer.contains(12) && !buyer.contains(1));
        assert!(seller.contains(1) && !seller.contains(12));
        assert_eq!(buyer.squad().len(), 3);
        assert_eq!(seller.squad().len(), 3);
        assert_eq!(buyer.squad().last().unwrap().club, "A");
        assert_eq!(seller.squad().last().unwrap().club, "B");
        assert!(validate_roster("A", buyer.squad()).is_ok());

        let record = &mediator.trade_log().records()[0];
        assert_eq!(record.round, 7);
        assert!(record.executed);
        assert_eq!(record.buyer_player.id, 1);
    }

    #[test]
    fn test_single_refusal_rejects_trade() {
        let mut mediator = Mediator::new("A", "B", 0.2);
        let mut buyer = club("A", ClubStrategy::Buyer, 0..3);
        let mut seller = club("B", ClubStrategy::Seller, 10..13);

        let offer = ExchangeOffer {
            buyer_player: 0,
            seller_player: 10,
        };

        for votes in [
            Votes { buyer: true, seller: false },
            Votes { buyer: false, seller: true },
            Votes { buyer: false, seller: false },
        ] {
            assert!(!mediator.settle_exchange(1, offer, votes, &mut buyer, &mut seller));
        }

        assert!(buyer.contains(0));
        assert!(seller.contains(10));
        assert_eq!(mediator.trade_log().len(), 3);
        assert_eq!(mediator.trade_log().executed_count(), 0);
    }

    #[test]
    fn test_missing_player_is_not_fatal() {
        let mut mediator = Mediator::new("A", "B", 0.2);
        let mut buyer = club("A", ClubStrategy::Buyer, 0..3);
        let mut seller = club("B", ClubStrategy::Seller, 10..13);

        let offer = ExchangeOffer {
            buyer_player: 99,
            seller_player: 10,
        };

        let votes = Votes {
            buyer: true,
            seller: true,
        };

        assert!(!mediator.settle_exchange(2, offer, votes, &mut buyer, &mut seller));
        assert_eq!(buyer.squad().len(), 3);
        assert!(seller.contains(10));

        let record = &mediator.trade_log().records()[0];
        assert!(!record.executed);
        assert_eq!(record.buyer_player.id, 99);
    }
}
