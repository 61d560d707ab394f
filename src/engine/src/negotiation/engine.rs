use crate::club::agent::NegotiatingClub;
use crate::club::player::Player;
use crate::error::{NegotiationError, NegotiationResult};
use crate::negotiation::{
    CancellationToken, ClubOutcome, NegotiationConfig, NegotiationOutcome, ProgressSnapshot,
    ProposalStrategy, RoundDecision,
};
use crate::transfers::{
    ExchangeOffer, Mediator, MoveKind, Proposal, SquadChanges, TradeLog, Votes, validate_roster,
};
use crate::utils::TimeEstimation;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// A club entering the negotiation with its squad in initial slot order.
#[derive(Debug, Clone)]
pub struct ClubSetup {
    pub name: String,
    pub squad: Vec<Player>,
}

impl ClubSetup {
    pub fn new(name: &str, squad: Vec<Player>) -> Self {
        ClubSetup {
            name: name.to_string(),
            squad,
        }
    }
}

struct StartingPoint {
    squad: Vec<Player>,
    utility: f64,
}

impl StartingPoint {
    fn of(club: &NegotiatingClub) -> Self {
        StartingPoint {
            squad: club.squad().to_vec(),
            utility: club.utility(),
        }
    }
}

/// Round-by-round negotiation between a buyer and a seller club.
///
/// Each round the mediator proposes one move, both clubs vote on it with their own
/// annealing state and the move is committed only if both agree. The run stops after
/// `max_rounds`; there is no convergence check.
pub struct Negotiation {
    config: NegotiationConfig,
    buyer: NegotiatingClub,
    seller: NegotiatingClub,
    mediator: Mediator,
    rng: StdRng,
    seed: u64,
    round: u64,
    accepted: u64,
    buyer_start: StartingPoint,
    seller_start: StartingPoint,
    snapshots: Vec<ProgressSnapshot>,
}

impl Negotiation {
    pub fn new(
        config: NegotiationConfig,
        buyer: ClubSetup,
        seller: ClubSetup,
    ) -> NegotiationResult<Self> {
        config.validate()?;

        for setup in [&buyer, &seller] {
            if setup.squad.is_empty() {
                return Err(NegotiationError::EmptySquad(setup.name.clone()));
            }

            validate_roster(&setup.name, &setup.squad)?;
        }

        // players are traded by id, so no id may be owned by both clubs
        let combined: Vec<Player> = buyer.squad.iter().chain(&seller.squad).cloned().collect();
        validate_roster(&format!("{} and {}", buyer.name, seller.name), &combined)?;

        let buyer_profile = config.buyer_profile.resolve()?;
        let seller_profile = config.seller_profile.resolve()?;

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());

        let buyer = NegotiatingClub::new(
            &buyer.name,
            buyer.squad,
            buyer_profile,
            config.utility.clone(),
            config.annealing.clone(),
        );

        let seller = NegotiatingClub::new(
            &seller.name,
            seller.squad,
            seller_profile,
            config.utility.clone(),
            config.annealing.clone(),
        );

        let mediator = Mediator::new(buyer.name(), seller.name(), config.shuffle_percentage);

        info!(
            "negotiation {} ({} players, {}) vs {} ({} players, {}), seed {}",
            buyer.name(),
            buyer.squad().len(),
            buyer.profile_name(),
            seller.name(),
            seller.squad().len(),
            seller.profile_name(),
            seed
        );

        let mut negotiation = Negotiation {
            buyer_start: StartingPoint::of(&buyer),
            seller_start: StartingPoint::of(&seller),
            config,
            buyer,
            seller,
            mediator,
            rng: StdRng::seed_from_u64(seed),
            seed,
            round: 0,
            accepted: 0,
            snapshots: Vec::new(),
        };

        let initial = negotiation.snapshot();
        negotiation.snapshots.push(initial);

        Ok(negotiation)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    pub fn buyer(&self) -> &NegotiatingClub {
        &self.buyer
    }

    pub fn seller(&self) -> &NegotiatingClub {
        &self.seller
    }

    pub fn trade_log(&self) -> &TradeLog {
        self.mediator.trade_log()
    }

    pub fn is_finished(&self) -> bool {
        self.round >= self.config.max_rounds
    }

    /// Plays a single round.
    pub fn step(&mut self) -> RoundDecision {
        let round = self.round;
        self.round += 1;

        let decision = match self.propose(round) {
            Some(Proposal::Lineup {
                kind,
                buyer_order,
                seller_order,
            }) => {
                let buyer_proposed = self.buyer.arranged(&buyer_order);
                let seller_proposed = self.seller.arranged(&seller_order);

                let votes = Votes {
                    buyer: self.buyer.vote_on(&buyer_proposed, &mut self.rng),
                    seller: self.seller.vote_on(&seller_proposed, &mut self.rng),
                };

                let committed = votes.unanimous();
                if committed {
                    self.buyer.rearrange(&buyer_order);
                    self.seller.rearrange(&seller_order);
                }

                RoundDecision {
                    round,
                    kind: Some(kind),
                    votes,
                    committed,
                }
            }
            Some(Proposal::Exchange(offer)) => {
                let votes = self.vote_exchange(offer);
                let committed = self.mediator.settle_exchange(
                    round,
                    offer,
                    votes,
                    &mut self.buyer,
                    &mut self.seller,
                );

                RoundDecision {
                    round,
                    kind: Some(MoveKind::Exchange),
                    votes,
                    committed,
                }
            }
            None => RoundDecision {
                round,
                kind: None,
                votes: Votes::default(),
                committed: false,
            },
        };

        if decision.committed {
            self.accepted += 1;
        }

        self.record_progress(&decision);

        decision
    }

    /// Plays the remaining rounds, checking `token` before each one.
    pub fn run(mut self, token: &CancellationToken) -> NegotiationOutcome {
        let (cancelled, elapsed_ms) = TimeEstimation::estimate(|| {
            while !self.is_finished() {
                if token.is_cancelled() {
                    warn!(
                        "negotiation cancelled after {} of {} rounds",
                        self.round, self.config.max_rounds
                    );
                    return true;
                }

                self.step();
            }

            false
        });

        self.finish(cancelled, elapsed_ms)
    }

    pub fn run_to_completion(self) -> NegotiationOutcome {
        self.run(&CancellationToken::new())
    }

    fn propose(&mut self, round: u64) -> Option<Proposal> {
        match self.config.strategy {
            ProposalStrategy::Exchange => {
                self.mediator
                    .propose_exchange(self.buyer.squad(), self.seller.squad(), &mut self.rng)
            }
            ProposalStrategy::Lineup => {
                let buyer_size = self.buyer.squad().len();
                let seller_size = self.seller.squad().len();

                let shuffle_round = match self.config.shuffle_period() {
                    Some(period) => round > 0 && round % period == 0,
                    None => false,
                };

                if shuffle_round {
                    Some(self.mediator.propose_shuffle(buyer_size, seller_size, &mut self.rng))
                } else {
                    Some(self.mediator.propose_swap(buyer_size, seller_size, &mut self.rng))
                }
            }
        }
    }

    fn vote_exchange(&mut self, offer: ExchangeOffer) -> Votes {
        let outgoing = self.buyer.player(offer.buyer_player).cloned();
        let incoming = self.seller.player(offer.seller_player).cloned();

        let (Some(outgoing), Some(incoming)) = (outgoing, incoming) else {
            return Votes::default();
        };

        let buyer_proposed = self.buyer.with_exchange(offer.buyer_player, &incoming);
        let seller_proposed = self.seller.with_exchange(offer.seller_player, &outgoing);

        match (buyer_proposed, seller_proposed) {
            (Some(buyer_proposed), Some(seller_proposed)) => Votes {
                buyer: self.buyer.vote_on(&buyer_proposed, &mut self.rng),
                seller: self.seller.vote_on(&seller_proposed, &mut self.rng),
            },
            _ => Votes::default(),
        }
    }

    fn record_progress(&mut self, decision: &RoundDecision) {
        let swaps = self.config.progress_interval_swaps;
        let rounds = self.config.progress_interval_rounds;

        let by_swaps = decision.committed && swaps > 0 && self.accepted % swaps == 0;
        let by_rounds = rounds > 0 && self.round % rounds == 0;

        if !(by_swaps || by_rounds) {
            return;
        }

        let snapshot = self.snapshot();

        info!(
            "round {}: {} accepted, {} {:.2} (T {:.3}), {} {:.2} (T {:.3})",
            snapshot.round,
            snapshot.accepted,
            self.buyer.name(),
            snapshot.buyer_utility,
            snapshot.buyer_temperature,
            self.seller.name(),
            snapshot.seller_utility,
            snapshot.seller_temperature
        );

        self.snapshots.push(snapshot);
    }

    fn snapshot(&self) -> ProgressSnapshot {
        let excerpt = |club: &NegotiatingClub| {
            club.squad()
                .iter()
                .take(self.config.excerpt_size)
                .map(|p| p.name.clone())
                .collect()
        };

        ProgressSnapshot {
            round: self.round,
            accepted: self.accepted,
            buyer_utility: self.buyer.utility(),
            seller_utility: self.seller.utility(),
            buyer_temperature: self.buyer.annealing().temperature(),
            seller_temperature: self.seller.annealing().temperature(),
            buyer_excerpt: excerpt(&self.buyer),
            seller_excerpt: excerpt(&self.seller),
        }
    }

    fn finish(mut self, cancelled: bool, elapsed_ms: u128) -> NegotiationOutcome {
        if self.snapshots.last().map(|s| s.round) != Some(self.round) {
            let last = self.snapshot();
            self.snapshots.push(last);
        }

        let buyer = club_outcome(&self.buyer, self.buyer_start);
        let seller = club_outcome(&self.seller, self.seller_start);

        info!(
            "negotiation finished after {} rounds in {} ms: {} accepted, {} {:+.2}, {} {:+.2}",
            self.round,
            elapsed_ms,
            self.accepted,
            buyer.club,
            buyer.utility_delta(),
            seller.club,
            seller.utility_delta()
        );

        NegotiationOutcome {
            seed: self.seed,
            strategy: self.config.strategy,
            rounds_played: self.round,
            accepted: self.accepted,
            cancelled,
            elapsed_ms,
            buyer,
            seller,
            trade_log: self.mediator.into_trade_log(),
            snapshots: self.snapshots,
        }
    }
}

fn club_outcome(club: &NegotiatingClub, start: StartingPoint) -> ClubOutcome {
    ClubOutcome {
        club: club.name().to_string(),
        profile: club.profile_name().to_string(),
        initial_utility: start.utility,
        final_utility: club.utility(),
        changes: SquadChanges::between(&start.squad, club.squad()),
        initial_squad: start.squad,
        final_squad: club.squad().to_vec(),
        final_temperature: club.annealing().temperature(),
        calibration: club.annealing().calibration_report().copied(),
        calibration_count: club.annealing().calibration_count(),
    }
}
