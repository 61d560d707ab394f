pub mod club;
pub mod error;
pub mod negotiation;
pub mod transfers;

pub mod shared;
pub mod utils;

// Re-export club items
pub use club::{
    // Player exports
    Attribute, AttributeVector, Player, PlayerBuilder, PlayerSkills, ATTRIBUTE_COUNT, UNKNOWN,
    // Agent exports
    AnnealingController, CalibrationReport, ClubStrategy, NegotiatingClub, PositionPreference,
    ProfileConfig, UtilityEvaluator, WeightProfile, POSITION_SLOTS,
};

pub use error::{NegotiationError, NegotiationResult, SquadError};
pub use negotiation::*;
pub use shared::*;
pub use transfers::*;
pub use utils::*;
