use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CraftError, Result};
use crate::models::Slot;

/// Lowest craftable tier.
pub const MIN_TIER: i32 = 4;

/// Highest craftable tier.
pub const MAX_TIER: i32 = 8;

/// Enchantment range: .0 to .3
pub const MIN_ENCH: i32 = 0;
pub const MAX_ENCH: i32 = 3;

/// Game-balance coefficients shared by every valuation formula.
///
/// Loaded once and passed by reference; nothing mutates it after
/// [`GameConstants::validate`] succeeds. Every tier-indexed array is indexed
/// by `tier - min_tier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConstants {
    pub min_tier: i32,
    pub max_tier: i32,
    pub min_ench: i32,
    pub max_ench: i32,

    /// Converts item value into the food-equivalent the market tax is charged on.
    pub item_value_to_food: f64,

    pub resource_item_value_base: f64,
    pub resource_item_value_coeff: f64,

    pub base_fame_coeffs: Vec<f64>,

    /// Fame growth per enchantment level.
    pub fame_factor: f64,

    /// Artifacts consumed by a royal item, per slot and tier.
    pub royal_artifact_amount: BTreeMap<Slot, Vec<u32>>,

    pub fame_per_journal: Vec<f64>,

    pub focus_cost_coeff: f64,
    pub focus_cost_divider: f64,

    pub artifact_item_value_coeff: f64,

    /// Fame multiplier with premium status.
    pub premium_bonus: f64,
}

impl Default for GameConstants {
    fn default() -> Self {
        let mut royal = BTreeMap::new();
        royal.insert(Slot::Head, vec![4, 8, 16, 16, 16]);
        royal.insert(Slot::Body, vec![2, 4, 8, 8, 8]);
        royal.insert(Slot::Legs, vec![2, 4, 8, 8, 8]);

        Self {
            min_tier: MIN_TIER,
            max_tier: MAX_TIER,
            min_ench: MIN_ENCH,
            max_ench: MAX_ENCH,
            item_value_to_food: 0.1125,
            resource_item_value_base: 2.0,
            resource_item_value_coeff: 2.0,
            base_fame_coeffs: vec![22.5, 90.0, 270.0, 645.0, 1395.0],
            fame_factor: 2.0,
            royal_artifact_amount: royal,
            fame_per_journal: vec![3600.0, 7200.0, 14400.0, 28380.0, 58590.0],
            focus_cost_coeff: 2.0,
            focus_cost_divider: 10000.0,
            artifact_item_value_coeff: 2.0,
            premium_bonus: 1.5,
        }
    }
}

fn tier_entry(name: &str, values: &[f64], idx: usize) -> Result<f64> {
    values.get(idx).copied().ok_or_else(|| {
        CraftError::config(format!(
            "{} has {} entries, no value for tier index {}",
            name,
            values.len(),
            idx
        ))
    })
}

impl GameConstants {
    /// Load constants from a YAML file; absent fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let constants: GameConstants = serde_yaml::from_str(&content).map_err(|e| {
            CraftError::config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        constants.validate()?;
        Ok(constants)
    }

    /// Number of tiers in the configured range.
    pub fn tier_count(&self) -> usize {
        (self.max_tier - self.min_tier + 1).max(0) as usize
    }

    /// Check ranges and that every tier-indexed array covers the tier range exactly.
    pub fn validate(&self) -> Result<()> {
        if self.min_tier > self.max_tier {
            return Err(CraftError::config(format!(
                "min_tier {} is above max_tier {}",
                self.min_tier, self.max_tier
            )));
        }
        if self.min_ench > self.max_ench {
            return Err(CraftError::config(format!(
                "min_ench {} is above max_ench {}",
                self.min_ench, self.max_ench
            )));
        }
        if self.focus_cost_divider == 0.0 {
            return Err(CraftError::config("focus_cost_divider must not be zero"));
        }

        let expected = self.tier_count();
        let check = |name: String, len: usize| {
            if len == expected {
                Ok(())
            } else {
                Err(CraftError::config(format!(
                    "{} has {} entries, expected {} (one per tier)",
                    name, len, expected
                )))
            }
        };

        check("base_fame_coeffs".to_string(), self.base_fame_coeffs.len())?;
        check("fame_per_journal".to_string(), self.fame_per_journal.len())?;
        for (slot, amounts) in &self.royal_artifact_amount {
            check(format!("royal_artifact_amount.{}", slot), amounts.len())?;
        }
        Ok(())
    }

    /// Validate `tier` and `ench` and return the tier index.
    pub fn level_index(&self, tier: i32, ench: i32) -> Result<usize> {
        if tier < self.min_tier || tier > self.max_tier {
            return Err(CraftError::Range {
                what: "Tier",
                value: tier,
                min: self.min_tier,
                max: self.max_tier,
            });
        }
        if ench < self.min_ench || ench > self.max_ench {
            return Err(CraftError::Range {
                what: "Enchantment",
                value: ench,
                min: self.min_ench,
                max: self.max_ench,
            });
        }
        Ok((tier - self.min_tier) as usize)
    }

    /// Every valid `(tier, ench)` pair, tier-major.
    pub fn levels(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (self.min_tier..=self.max_tier)
            .flat_map(move |tier| (self.min_ench..=self.max_ench).map(move |ench| (tier, ench)))
    }

    /// Base fame coefficient at tier index `idx`.
    pub fn base_fame(&self, idx: usize) -> Result<f64> {
        tier_entry("base_fame_coeffs", &self.base_fame_coeffs, idx)
    }

    /// Fame needed to fill one journal at tier index `idx`.
    pub fn journal_fame(&self, idx: usize) -> Result<f64> {
        tier_entry("fame_per_journal", &self.fame_per_journal, idx)
    }

    /// Artifacts consumed by a royal item in `slot` at tier index `idx`.
    pub fn royal_amount(&self, slot: Slot, idx: usize) -> Result<u32> {
        self.royal_artifact_amount
            .get(&slot)
            .and_then(|amounts| amounts.get(idx).copied())
            .ok_or_else(|| {
                CraftError::config(format!("no royal artifact amount for slot '{}'", slot))
            })
    }
}
