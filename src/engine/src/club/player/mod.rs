pub mod builder;
pub mod player;
pub mod skills;

pub use builder::*;
pub use player::*;
pub use skills::*;
