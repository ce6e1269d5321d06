use crate::engine::constants::GameConstants;
use crate::engine::game_data::GameData;
use crate::error::{CraftError, Result};
use crate::models::{MasteryBonus, Recipe};
use crate::table::{level_key, tier_key, KeyedTable};

/// Caller-supplied market modifiers for [`Recipe::cost_price`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostParams {
    /// Marketplace tax, charged per 100 food-equivalent of item value.
    pub tax: f64,
    /// Fraction of resources refunded per craft, in `[0, 1]`.
    pub return_rate: f64,
}

impl CostParams {
    pub fn new(tax: f64, return_rate: f64) -> Result<Self> {
        let params = Self { tax, return_rate };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.return_rate) {
            return Err(CraftError::InvalidInput(format!(
                "return rate {} is outside of [0, 1]",
                self.return_rate
            )));
        }
        if self.tax.is_nan() || self.tax < 0.0 {
            return Err(CraftError::InvalidInput(format!("tax {} is negative", self.tax)));
        }
        Ok(())
    }
}

impl Recipe {
    /// Artifacts consumed per craft: one, or the royal amount for the slot.
    pub fn artifact_amount(&self, constants: &GameConstants, idx: usize) -> Result<u32> {
        if !self.is_royal {
            return Ok(1);
        }
        let slot = self.require_slot("Royal artifact amount")?;
        constants.royal_amount(slot, idx)
    }

    /// Cost of one craft at `tier.ench`.
    ///
    /// `Ok(None)` means a market price needed for the calculation is missing
    /// from `resources` or `artifacts`.
    pub fn cost_price(
        &self,
        data: &GameData,
        tier: i32,
        ench: i32,
        resources: &KeyedTable,
        artifacts: Option<&KeyedTable>,
        params: CostParams,
    ) -> Result<Option<f64>> {
        let idx = data.constants.level_index(tier, ench)?;
        params.validate()?;

        let key = level_key(tier, ench);
        let Some(prices) = resources.get_row(&key) else {
            log::warn!("Not enough data to compute '{} {}': no resource prices", self.name, key);
            return Ok(None);
        };

        let mut total = 0.0;
        for (resource, quantity) in &self.resources {
            match prices.get_value(resource) {
                Some(price) => total += price * f64::from(*quantity),
                None => {
                    log::warn!(
                        "Not enough data to compute '{} {}': no price for '{}'",
                        self.name,
                        key,
                        resource
                    );
                    return Ok(None);
                }
            }
        }

        total *= 1.0 - params.return_rate;

        if let Some(artifact) = &self.artifact {
            let price = artifacts
                .and_then(|table| table.get_row(&tier_key(tier)))
                .and_then(|row| row.get_value(artifact));
            let Some(price) = price else {
                log::warn!(
                    "Not enough data to compute '{} {}': no price for artifact '{}'",
                    self.name,
                    key,
                    artifact
                );
                return Ok(None);
            };
            total += f64::from(self.artifact_amount(&data.constants, idx)?) * price;
        }

        let c = &data.constants;
        total += c.item_value_to_food * self.item_value(data, tier, ench)? / 100.0 * params.tax;

        Ok(Some(total))
    }

    /// Item value of the crafted item at `tier.ench`.
    pub fn item_value(&self, data: &GameData, tier: i32, ench: i32) -> Result<f64> {
        let c = &data.constants;
        let idx = c.level_index(tier, ench)?;

        let resource_unit_value =
            c.resource_item_value_base * c.resource_item_value_coeff.powi(tier + ench - 1);
        let mut value = f64::from(self.resource_units()) * resource_unit_value;

        if let Some(artifact) = &self.artifact {
            let base_value = data.artifact_item_value(artifact)?;
            let factor = c.artifact_item_value_coeff.powi(idx as i32);
            let amount = self.artifact_amount(c, idx)?;
            value += f64::from(amount) * base_value * factor;
        }

        Ok(value)
    }

    /// Fame earned by one craft, without premium.
    pub fn fame(&self, constants: &GameConstants, tier: i32, ench: i32) -> Result<f64> {
        let idx = constants.level_index(tier, ench)?;
        let base = constants.base_fame(idx)? * f64::from(self.resource_units());
        Ok(base * constants.fame_factor.powi(ench))
    }

    /// Fame earned by one craft, with the premium bonus applied when `premium` is set.
    pub fn fame_earned(
        &self,
        constants: &GameConstants,
        tier: i32,
        ench: i32,
        premium: bool,
    ) -> Result<f64> {
        let fame = self.fame(constants, tier, ench)?;
        Ok(if premium {
            fame * constants.premium_bonus
        } else {
            fame
        })
    }

    /// Journals filled by one craft.
    pub fn journals_amount(
        &self,
        constants: &GameConstants,
        tier: i32,
        ench: i32,
        premium: bool,
    ) -> Result<f64> {
        let idx = constants.level_index(tier, ench)?;
        let fame = self.fame_earned(constants, tier, ench, premium)?;
        Ok(fame / constants.journal_fame(idx)?)
    }

    /// Focus spent on one craft given the crafter's focus efficiency.
    pub fn focus_cost(
        &self,
        data: &GameData,
        tier: i32,
        ench: i32,
        focus_efficiency: f64,
    ) -> Result<f64> {
        let c = &data.constants;
        c.level_index(tier, ench)?;
        let slot = self.require_slot("Focus cost")?;
        let base_cost = data.base_focus_cost(tier, ench, slot)?;

        let power = focus_efficiency / c.focus_cost_divider;
        let denominator = c.focus_cost_coeff.powf(power);
        Ok(base_cost / denominator)
    }

    /// Crafted item quality. No formula is known yet.
    pub fn quality(&self, _tier: i32, _ench: i32, _bonus: MasteryBonus) -> Result<f64> {
        Err(CraftError::NotImplemented("item quality formula"))
    }
}
