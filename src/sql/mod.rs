//! SQL generation: identifiers from entity declarations only, values as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
