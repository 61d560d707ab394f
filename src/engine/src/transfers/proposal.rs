use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Buyer,
    Seller,
}

impl Side {
    pub fn other(&self) -> Side {
        match self {
            Side::Buyer => Side::Seller,
            Side::Seller => Side::Buyer,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Side::Buyer => write!(f, "buyer"),
            Side::Seller => write!(f, "seller"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    Swap,
    Shuffle,
    Exchange,
}

/// One player from each club changing sides, identified by player id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeOffer {
    pub buyer_player: u32,
    pub seller_player: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Proposal {
    /// New slot orders for both squads; `order[i]` is the current slot moved to slot `i`.
    Lineup {
        kind: MoveKind,
        buyer_order: Vec<usize>,
        seller_order: Vec<usize>,
    },
    Exchange(ExchangeOffer),
}

impl Proposal {
    pub fn kind(&self) -> MoveKind {
        match self {
            Proposal::Lineup { kind, .. } => *kind,
            Proposal::Exchange(_) => MoveKind::Exchange,
        }
    }

    pub fn order(&self, side: Side) -> Option<&[usize]> {
        match self {
            Proposal::Lineup {
                buyer_order,
                seller_order,
                ..
            } => match side {
                Side::Buyer => Some(buyer_order.as_slice()),
                Side::Seller => Some(seller_order.as_slice()),
            },
            Proposal::Exchange(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Votes {
    pub buyer: bool,
    pub seller: bool,
}

impl Votes {
    /// Moves are only committed with mutual consent.
    pub fn unanimous(&self) -> bool {
        self.buyer && self.seller
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unanimous_requires_both_votes() {
        assert!(Votes { buyer: true, seller: true }.unanimous());
        assert!(!Votes { buyer: true, seller: false }.unanimous());
        assert!(!Votes { buyer: false, seller: true }.unanimous());
        assert!(!Votes::default().unanimous());
    }

    #[test]
    fn test_proposal_order() {
        let proposal = Proposal::Lineup {
            kind: MoveKind::Swap,
            buyer_order: vec![1, 0],
            seller_order: vec![0, 1, 2],
        };

        assert_eq!(proposal.kind(), MoveKind::Swap);
        assert_eq!(proposal.order(Side::Buyer), Some(&[1, 0][..]));
        assert_eq!(proposal.order(Side::Seller).map(|o| o.len()), Some(3));

        let exchange = Proposal::Exchange(ExchangeOffer {
            buyer_player: 1,
            seller_player: 2,
        });
        assert_eq!(exchange.kind(), MoveKind::Exchange);
        assert_eq!(exchange.order(Side::Buyer), None);
    }
}
