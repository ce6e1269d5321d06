use crate::engine::constants::GameConstants;
use crate::error::{CraftError, Result};
use crate::models::Slot;
use crate::table::{level_key, KeyedTable};

/// Row of the artifact item value table holding the base values.
pub const ARTIFACT_VALUE_ROW: &str = "item_value";

/// Static game data every valuation formula may read.
///
/// Unlike market prices, a gap here is an operator mistake, so lookups
/// fail with [`CraftError::Configuration`].
#[derive(Debug, Clone, Default)]
pub struct GameData {
    pub constants: GameConstants,

    /// One row, [`ARTIFACT_VALUE_ROW`], with a column per artifact.
    pub artifact_item_values: KeyedTable,

    /// Rows `"{tier}.{ench}"`, one column per slot.
    pub base_focus_cost: KeyedTable,
}

impl GameData {
    pub fn new(
        constants: GameConstants,
        artifact_item_values: KeyedTable,
        base_focus_cost: KeyedTable,
    ) -> Result<Self> {
        constants.validate()?;
        Ok(Self {
            constants,
            artifact_item_values,
            base_focus_cost,
        })
    }

    /// Base item value of an artifact at the lowest tier.
    pub fn artifact_item_value(&self, artifact: &str) -> Result<f64> {
        self.artifact_item_values
            .get_cell(ARTIFACT_VALUE_ROW, artifact)
            .filter(|v| !v.is_nan())
            .ok_or_else(|| {
                CraftError::config(format!("no item value for artifact '{}'", artifact))
            })
    }

    /// Base focus cost of crafting into `slot` at `tier.ench`.
    pub fn base_focus_cost(&self, tier: i32, ench: i32, slot: Slot) -> Result<f64> {
        let key = level_key(tier, ench);
        self.base_focus_cost
            .get_cell(&key, slot.as_str())
            .filter(|v| !v.is_nan())
            .ok_or_else(|| {
                CraftError::config(format!("no base focus cost for '{} {}'", slot, key))
            })
    }
}
