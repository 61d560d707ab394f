use crate::club::agent::CalibrationReport;
use crate::club::player::Player;
use crate::negotiation::{ProposalStrategy, UtilityStatistics};
use crate::transfers::{MoveKind, SquadChanges, TradeLog, Votes};
use serde::Serialize;

/// What happened in one round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundDecision {
    pub round: u64,
    pub kind: Option<MoveKind>,
    pub votes: Votes,
    pub committed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub round: u64,
    pub accepted: u64,
    pub buyer_utility: f64,
    pub seller_utility: f64,
    pub buyer_temperature: f64,
    pub seller_temperature: f64,
    /// Names in the first slots of each squad.
    pub buyer_excerpt: Vec<String>,
    pub seller_excerpt: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubOutcome {
    pub club: String,
    pub profile: String,
    pub initial_utility: f64,
    pub final_utility: f64,
    pub initial_squad: Vec<Player>,
    pub final_squad: Vec<Player>,
    pub changes: SquadChanges,
    pub final_temperature: f64,
    pub calibration: Option<CalibrationReport>,
    pub calibration_count: u32,
}

impl ClubOutcome {
    pub fn utility_delta(&self) -> f64 {
        self.final_utility - self.initial_utility
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NegotiationOutcome {
    pub seed: u64,
    pub strategy: ProposalStrategy,
    pub rounds_played: u64,
    pub accepted: u64,
    pub cancelled: bool,
    pub elapsed_ms: u128,
    pub buyer: ClubOutcome,
    pub seller: ClubOutcome,
    pub trade_log: TradeLog,
    pub snapshots: Vec<ProgressSnapshot>,
}

impl NegotiationOutcome {
    pub fn acceptance_rate(&self) -> f64 {
        if self.rounds_played == 0 {
            return 0.0;
        }

        self.accepted as f64 / self.rounds_played as f64
    }

    pub fn buyer_statistics(&self) -> Option<UtilityStatistics> {
        let series: Vec<f64> = self.snapshots.iter().map(|s| s.buyer_utility).collect();
        UtilityStatistics::from_series(&series)
    }

    pub fn seller_statistics(&self) -> Option<UtilityStatistics> {
        let series: Vec<f64> = self.snapshots.iter().map(|s| s.seller_utility).collect();
        UtilityStatistics::from_series(&series)
    }
}
