pub mod assessment;
pub mod measurement;
pub mod prediction;

pub use assessment::*;
pub use measurement::*;
pub use prediction::*;
