pub mod agent;
pub mod player;

pub use agent::*;
pub use player::*;
