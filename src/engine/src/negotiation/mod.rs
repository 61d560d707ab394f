pub mod batch;
pub mod cancellation;
pub mod config;
pub mod engine;
pub mod result;
pub mod statistics;

pub use batch::*;
pub use cancellation::*;
pub use config::*;
pub use engine::*;
pub use result::*;
pub use statistics::*;
