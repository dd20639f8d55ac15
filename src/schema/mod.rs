pub mod resolved;
pub mod types;

pub use resolved::*;
pub use types::*;
