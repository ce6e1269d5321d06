mod mastery;
mod recipe;
mod result;

pub use mastery::{Masteries, MasteryBonus, MasteryConfig, MasteryConstants};
pub use recipe::{Recipe, Slot};
pub use result::{CraftRecord, Projection};
