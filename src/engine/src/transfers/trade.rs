use crate::club::player::{Player, UNKNOWN};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferedPlayer {
    pub id: u32,
    pub name: String,
    pub value: f64,
}

impl OfferedPlayer {
    pub fn from_player(player: &Player) -> Self {
        OfferedPlayer {
            id: player.id,
            name: player.name.clone(),
            value: player.value.amount,
        }
    }

    pub fn missing(id: u32) -> Self {
        OfferedPlayer {
            id,
            name: UNKNOWN.to_string(),
            value: 0.0,
        }
    }
}

/// Decision on a single exchange proposal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    pub round: u64,
    /// Offered by the buyer, would join the seller.
    pub buyer_player: OfferedPlayer,
    /// Offered by the seller, would join the buyer.
    pub seller_player: OfferedPlayer,
    pub buyer_accepted: bool,
    pub seller_accepted: bool,
    pub executed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerMovement {
    pub round: u64,
    pub player_id: u32,
    pub player_name: String,
    pub from_club: String,
    pub to_club: String,
}

/// Append-only log of exchange decisions between two clubs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeLog {
    buyer_club: String,
    seller_club: String,
    records: Vec<TradeRecord>,
}

impl TradeLog {
    pub fn new(buyer_club: &str, seller_club: &str) -> Self {
        TradeLog {
            buyer_club: buyer_club.to_string(),
            seller_club: seller_club.to_string(),
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: TradeRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn executed(&self) -> impl Iterator<Item = &TradeRecord> {
        self.records.iter().filter(|r| r.executed)
    }

    pub fn executed_count(&self) -> usize {
        self.executed().count()
    }

    pub fn movements(&self) -> Vec<PlayerMovement> {
        self.executed()
            .flat_map(|record| {
                [
                    PlayerMovement {
                        round: record.round,
                        player_id: record.buyer_player.id,
                        player_name: record.buyer_player.name.clone(),
                        from_club: self.buyer_club.clone(),
                        to_club: self.seller_club.clone(),
                    },
                    PlayerMovement {
                        round: record.round,
                        player_id: record.seller_player.id,
                        player_name: record.seller_player.name.clone(),
                        from_club: self.seller_club.clone(),
                        to_club: self.buyer_club.clone(),
                    },
                ]
            })
            .collect()
    }
}

/// Who stayed, who arrived and who left, comparing two squads by player id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SquadChanges {
    pub kept: Vec<u32>,
    pub received: Vec<u32>,
    pub departed: Vec<u32>,
}

impl SquadChanges {
    pub fn between(initial: &[Player], current: &[Player]) -> Self {
        let contains = |squad: &[Player], id: u32| squad.iter().any(|p| p.id == id);

        SquadChanges {
            kept: current
                .iter()
                .filter(|p| contains(initial, p.id))
                .map(|p| p.id)
                .collect(),
            received: current
                .iter()
                .filter(|p| !contains(initial, p.id))
                .map(|p| p.id)
                .collect(),
            departed: initial
                .iter()
                .filter(|p| !contains(current, p.id))
                .map(|p| p.id)
                .collect(),
        }
    }
}
