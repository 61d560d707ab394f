mod error;
mod generators;
mod loaders;

pub use error::*;
pub use generators::*;
pub use loaders::*;
