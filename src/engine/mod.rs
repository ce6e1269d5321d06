pub mod constants;
pub mod game_data;
pub mod mastery;
pub mod requirements;
pub mod valuation;

pub use constants::*;
pub use game_data::{GameData, ARTIFACT_VALUE_ROW};
pub use requirements::{gross_requirement, simulate_crafts};
pub use valuation::CostParams;
