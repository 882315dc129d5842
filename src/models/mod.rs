pub mod analysis;
pub mod provider;
pub mod refinement;
pub mod transcript;

pub use analysis::*;
pub use provider::*;
pub use refinement::*;
pub use transcript::*;
