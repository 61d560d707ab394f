use crate::club::player::Player;
use crate::error::SquadError;
use crate::transfers::Side;
use std::collections::HashSet;

/// Checks that `order` is a permutation of `0..pool_size`.
pub fn validate_squad(side: Side, order: &[usize], pool_size: usize) -> Result<(), SquadError> {
    if order.len() != pool_size {
        return Err(SquadError::SizeMismatch {
            side,
            expected: pool_size,
            actual: order.len(),
        });
    }

    let mut seen = vec![false; pool_size];

    for &index in order {
        if index >= pool_size {
            return Err(SquadError::IndexOutOfRange {
                side,
                index,
                size: pool_size,
            });
        }

        if seen[index] {
            return Err(SquadError::DuplicateIndex { side, index });
        }

        seen[index] = true;
    }

    Ok(())
}

/// Sanity check for lineup proposals. Not run every round.
pub fn validate_squads(
    buyer_order: &[usize],
    buyer_pool: usize,
    seller_order: &[usize],
    seller_pool: usize,
) -> Result<(), SquadError> {
    validate_squad(Side::Buyer, buyer_order, buyer_pool)?;
    validate_squad(Side::Seller, seller_order, seller_pool)
}

/// Every player appears at most once in a club's squad.
pub fn validate_roster(club: &str, squad: &[Player]) -> Result<(), SquadError> {
    let mut seen = HashSet::with_capacity(squad.len());

    for player in squad {
        if !seen.insert(player.id) {
            return Err(SquadError::DuplicatePlayer {
                club: club.to_string(),
                id: player.id,
            });
        }
    }

    Ok(())
}
