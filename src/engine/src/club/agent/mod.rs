pub mod annealing;
pub mod club;
pub mod profile;
pub mod utility;

pub use annealing::*;
pub use club::*;
pub use profile::*;
pub use utility::*;
