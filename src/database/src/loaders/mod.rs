mod players;
mod settings;

pub use players::*;
pub use settings::*;
