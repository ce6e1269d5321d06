use std::collections::HashMap;
use std::path::Path;

use crate::crafter::config::CraftConfig;
use crate::crafter::market::MarketInputs;
use crate::engine::GameData;
use crate::error::{CraftError, Result};
use crate::models::{CraftRecord, MasteryConfig, Projection, Recipe};
use crate::table::{level_key, tier_key, KeyedTable};

pub const COL_TIER: &str = "tier";
pub const COL_ENCH: &str = "ench";
pub const COL_COST_PRICE: &str = "cost_price";
pub const COL_ITEM_VALUE: &str = "item_value";
pub const COL_FAME: &str = "fame";
pub const COL_FOCUS: &str = "focus";
pub const COL_JOURNALS_AMOUNT: &str = "journals_amount";
pub const COL_JOURNALS_BUYING: &str = "journals_buying";
pub const COL_JOURNALS_SELLING: &str = "journals_selling";
pub const COL_SELL_PRICE: &str = "sell_price";
pub const COL_ABSOLUTE_PROFIT: &str = "absolute_profit";
pub const COL_RELATIVE_PROFIT: &str = "relative_profit";
pub const COL_PROFIT_PER_FOCUS: &str = "profit_per_focus";

/// Runs the valuation formulas of every recipe over the whole tier/enchantment grid.
#[derive(Debug, Clone)]
pub struct Crafter {
    data: GameData,
    mastery_config: MasteryConfig,
    recipes: Vec<Recipe>,
}

fn cell(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}

impl Crafter {
    pub fn new(data: GameData, mastery_config: MasteryConfig, recipes: Vec<Recipe>) -> Self {
        Self {
            data,
            mastery_config,
            recipes,
        }
    }

    /// Load a crafter from a configuration directory.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let config = CraftConfig::load(dir)?;
        Ok(Self::from(config))
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn recipe(&self, name: &str) -> Result<&Recipe> {
        self.recipes
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| CraftError::UnknownRecipe(name.to_string()))
    }

    /// Compute every metric of `recipe` at `tier.ench`.
    ///
    /// Missing market data leaves the affected metrics `None`; range and
    /// configuration errors are returned.
    pub fn evaluate(
        &self,
        recipe: &Recipe,
        tier: i32,
        ench: i32,
        market: &MarketInputs<'_>,
    ) -> Result<CraftRecord> {
        let data = &self.data;
        let c = &data.constants;

        let cost_price = recipe.cost_price(
            data,
            tier,
            ench,
            market.resources,
            market.artifacts,
            market.params,
        )?;
        let item_value = recipe.item_value(data, tier, ench)?;
        let fame = recipe.fame_earned(c, tier, ench, market.premium)?;
        let journals_amount = recipe.journals_amount(c, tier, ench, market.premium)?;

        let focus = if recipe.slot.is_none() {
            log::warn!("'{}' has no slot, focus cost is unavailable", recipe.name);
            None
        } else {
            match recipe.compute_masteries(&self.mastery_config, market.masteries)? {
                Some(bonus) => Some(recipe.focus_cost(data, tier, ench, bonus.focus_efficiency)?),
                None => None,
            }
        };

        let (journals_buying, journals_selling) = match market.journals {
            Some(journals) => {
                let machine = recipe.machine.as_deref().ok_or_else(|| {
                    CraftError::config(format!("Journals of '{}' require a machine", recipe.name))
                })?;
                let key = tier_key(tier);
                let price = |table: &KeyedTable| {
                    let price = table.get_row(&key).and_then(|row| row.get_value(machine));
                    if price.is_none() {
                        log::warn!("No journal price for '{}' at tier {}", machine, tier);
                    }
                    price.map(|p| p * journals_amount)
                };
                (price(journals.buy), price(journals.sell))
            }
            None => (None, None),
        };

        let sell_price = market.sell_prices.and_then(|table| {
            table
                .get_row(&level_key(tier, ench))
                .and_then(|row| row.get_value(&recipe.name))
        });

        let journal_profit = match market.journals {
            Some(_) => journals_selling
                .zip(journals_buying)
                .map(|(sell, buy)| sell - buy),
            None => Some(0.0),
        };
        let absolute_profit = match (sell_price, cost_price, journal_profit) {
            (Some(sell), Some(cost), Some(journal)) => Some(sell - cost + journal),
            _ => None,
        };
        let relative_profit = absolute_profit
            .zip(cost_price)
            .filter(|(_, cost)| *cost != 0.0)
            .map(|(profit, cost)| profit / cost);
        let profit_per_focus = absolute_profit
            .zip(focus)
            .filter(|(_, focus)| *focus > 0.0)
            .map(|(profit, focus)| profit / focus);

        log::debug!(
            "{} {}.{}: cost={:?} fame={:.1} focus={:?}",
            recipe.name,
            tier,
            ench,
            cost_price,
            fame,
            focus
        );

        Ok(CraftRecord {
            item: recipe.name.clone(),
            tier,
            ench,
            cost_price,
            item_value,
            fame,
            focus,
            journals_amount,
            journals_buying,
            journals_selling,
            sell_price,
            absolute_profit,
            relative_profit,
            profit_per_focus,
        })
    }

    /// Evaluate every recipe at every valid `(tier, ench)`.
    pub fn records(&self, market: &MarketInputs<'_>) -> Result<Vec<CraftRecord>> {
        let mut records = Vec::new();
        for recipe in &self.recipes {
            for (tier, ench) in self.data.constants.levels() {
                records.push(self.evaluate(recipe, tier, ench, market)?);
            }
        }

        let unavailable = records.iter().filter(|r| r.cost_price.is_none()).count();
        log::info!(
            "Computed {} records ({} without cost price)",
            records.len(),
            unavailable
        );
        Ok(records)
    }

    /// Evaluate the whole grid and assemble the aggregate table.
    pub fn prices(&self, market: &MarketInputs<'_>) -> Result<KeyedTable> {
        let records = self.records(market)?;
        records_to_table(
            &records,
            market.journals.is_some(),
            market.sell_prices.is_some(),
        )
    }

    /// Scale the per-unit metrics of one recipe to `amount` crafts.
    pub fn calculate(
        &self,
        item: &str,
        tier: i32,
        ench: i32,
        amount: u64,
        market: &MarketInputs<'_>,
    ) -> Result<Projection> {
        let recipe = self.recipe(item)?;
        let record = self.evaluate(recipe, tier, ench, market)?;
        let resources = recipe.requirements(amount, market.params.return_rate)?;

        let scale = amount as f64;
        Ok(Projection {
            item: recipe.name.clone(),
            tier,
            ench,
            amount,
            resources,
            total_cost: record.cost_price.map(|v| v * scale),
            total_fame: record.fame * scale,
            total_focus: record.focus.map(|v| v * scale),
            total_profit: record.absolute_profit.map(|v| v * scale),
        })
    }
}

impl From<CraftConfig> for Crafter {
    fn from(config: CraftConfig) -> Self {
        Self::new(config.data, config.mastery_config, config.recipes)
    }
}

/// Column layout of the aggregate table.
pub fn result_columns(with_journals: bool, with_sell_prices: bool) -> Vec<&'static str> {
    let mut columns = vec![
        COL_TIER,
        COL_ENCH,
        COL_COST_PRICE,
        COL_ITEM_VALUE,
        COL_FAME,
        COL_FOCUS,
        COL_JOURNALS_AMOUNT,
    ];
    if with_journals {
        columns.extend([COL_JOURNALS_BUYING, COL_JOURNALS_SELLING]);
    }
    if with_sell_prices {
        columns.extend([
            COL_SELL_PRICE,
            COL_ABSOLUTE_PROFIT,
            COL_RELATIVE_PROFIT,
            COL_PROFIT_PER_FOCUS,
        ]);
    }
    columns
}

/// Build the aggregate table: one row per record, unavailable cells as `NaN`.
pub fn records_to_table(
    records: &[CraftRecord],
    with_journals: bool,
    with_sell_prices: bool,
) -> Result<KeyedTable> {
    let columns = result_columns(with_journals, with_sell_prices);
    let mut table = KeyedTable::with_columns(columns.iter().copied())?;

    for record in records {
        let values: HashMap<String, f64> = columns
            .iter()
            .map(|&column| {
                let value = match column {
                    COL_TIER => f64::from(record.tier),
                    COL_ENCH => f64::from(record.ench),
                    COL_COST_PRICE => cell(record.cost_price),
                    COL_ITEM_VALUE => record.item_value,
                    COL_FAME => record.fame,
                    COL_FOCUS => cell(record.focus),
                    COL_JOURNALS_AMOUNT => record.journals_amount,
                    COL_JOURNALS_BUYING => cell(record.journals_buying),
                    COL_JOURNALS_SELLING => cell(record.journals_selling),
                    COL_SELL_PRICE => cell(record.sell_price),
                    COL_ABSOLUTE_PROFIT => cell(record.absolute_profit),
                    COL_RELATIVE_PROFIT => cell(record.relative_profit),
                    COL_PROFIT_PER_FOCUS => cell(record.profit_per_focus),
                    _ => f64::NAN,
                };
                (column.to_string(), value)
            })
            .collect();
        table.add_row(&record.key(), &values)?;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_columns() {
        assert_eq!(result_columns(false, false).len(), 7);
        let all = result_columns(true, true);
        assert_eq!(all.len(), 13);
        assert_eq!(all.last(), Some(&COL_PROFIT_PER_FOCUS));
    }

    #[test]
    fn test_records_to_table_marks_unavailable() {
        let record = CraftRecord {
            item: "boots".to_string(),
            tier: 5,
            ench: 1,
            cost_price: None,
            item_value: 256.0,
            fame: 180.0,
            focus: Some(400.0),
            journals_amount: 0.05,
            journals_buying: None,
            journals_selling: None,
            sell_price: None,
            absolute_profit: None,
            relative_profit: None,
            profit_per_focus: None,
        };

        let table = records_to_table(&[record], false, true).unwrap();
        assert_eq!(table.rows(), ["boots 5.1"]);
        assert_eq!(table.get_cell("boots 5.1", COL_TIER), Some(5.0));
        assert_eq!(table.get_cell("boots 5.1", COL_FOCUS), Some(400.0));
        assert!(table.get_cell("boots 5.1", COL_COST_PRICE).unwrap().is_nan());
        assert!(table.get_cell("boots 5.1", COL_SELL_PRICE).unwrap().is_nan());
        assert_eq!(table.get_cell("boots 5.1", COL_JOURNALS_BUYING), None);
    }
}
