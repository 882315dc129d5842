pub mod aggregator;
pub mod compatibility;
pub mod extract;

pub use aggregator::*;
pub use compatibility::*;
pub use extract::*;
