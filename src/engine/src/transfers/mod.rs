pub mod mediator;
pub mod proposal;
pub mod trade;
pub mod validation;

pub use mediator::*;
pub use proposal::*;
pub use trade::*;
pub use validation::*;
