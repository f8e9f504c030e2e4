pub mod controller;
pub mod highlight;
pub mod normalize;
pub mod progression;
pub mod result;
pub mod timer;

pub use controller::{KeystrokeOutcome, Phase, SessionController};
pub use result::ScoringResult;
