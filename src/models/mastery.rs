use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-item mastery constants.
///
/// `own_*` applies only when crafting the item the mastery belongs to;
/// `common_*` applies to every item of the family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasteryConstants {
    pub own_efficiency: f64,
    pub own_quality: f64,
    pub common_efficiency: f64,
    pub common_quality: f64,
}

impl Default for MasteryConstants {
    fn default() -> Self {
        Self {
            own_efficiency: 250.0,
            own_quality: 6.0,
            common_efficiency: 30.0,
            common_quality: 0.75,
        }
    }
}

/// Family to item to mastery constants.
pub type MasteryConfig = BTreeMap<String, BTreeMap<String, MasteryConstants>>;

/// Family to item to the crafter's current mastery level.
pub type Masteries = BTreeMap<String, BTreeMap<String, f64>>;

/// Focus efficiency and quality derived from masteries.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MasteryBonus {
    pub focus_efficiency: f64,
    pub quality: f64,
}
