use std::collections::BTreeMap;

use crate::error::{CraftError, Result};
use crate::models::Recipe;

/// Units refunded after each craft.
fn refund_per_craft(per_craft: u32, return_rate: f64) -> u64 {
    (return_rate * f64::from(per_craft)).floor() as u64
}

/// Number of crafts `stock` units allow when every craft consumes
/// `per_craft` units and refunds `floor(return_rate * per_craft)`.
///
/// Counting stops one past `limit`, so a refund that covers the whole craft
/// still terminates.
pub fn simulate_crafts(stock: u64, per_craft: u32, return_rate: f64, limit: u64) -> u64 {
    let refund = refund_per_craft(per_craft, return_rate);
    let per_craft = u64::from(per_craft);
    let cap = limit.saturating_add(1);

    if stock < per_craft {
        return 0;
    }
    match per_craft.checked_sub(refund).filter(|&net| net > 0) {
        // every craft after the first needs `net` more units
        Some(net) => ((stock - per_craft) / net).saturating_add(1).min(cap),
        None => cap,
    }
}

/// Smallest stock that yields exactly `amount` crafts, or `None` if no
/// stock inside the search window does.
///
/// The direct candidate `amount * (per_craft - refund) + refund` is tried
/// first. The fallback window is the refund-adjusted estimate widened by
/// `per_craft` on either side.
pub fn gross_requirement(amount: u64, per_craft: u32, return_rate: f64) -> Option<u64> {
    let refund = refund_per_craft(per_craft, return_rate);
    let net = u64::from(per_craft).saturating_sub(refund);
    let estimate = amount.saturating_mul(net);

    let exact = |stock: u64| simulate_crafts(stock, per_craft, return_rate, amount) == amount;

    let candidate = if amount == 0 {
        0
    } else {
        estimate.saturating_add(refund)
    };
    if exact(candidate) && (candidate == 0 || !exact(candidate - 1)) {
        return Some(candidate);
    }

    let lo = estimate.saturating_sub(u64::from(per_craft));
    let hi = estimate.saturating_add(u64::from(per_craft));
    (lo..=hi).find(|&stock| exact(stock))
}

impl Recipe {
    /// Gross units of every resource needed to finish `amount` crafts.
    ///
    /// A `None` entry means no stock in the search window produces exactly
    /// `amount` crafts.
    pub fn requirements(
        &self,
        amount: u64,
        return_rate: f64,
    ) -> Result<BTreeMap<String, Option<u64>>> {
        if !(0.0..=1.0).contains(&return_rate) {
            return Err(CraftError::InvalidInput(format!(
                "return rate {} is outside of [0, 1]",
                return_rate
            )));
        }

        Ok(self
            .resources
            .iter()
            .map(|(resource, per_craft)| {
                let needed = gross_requirement(amount, *per_craft, return_rate);
                if needed.is_none() {
                    log::warn!(
                        "Can't find requirement of '{}' for {} x '{}'",
                        resource,
                        amount,
                        self.name
                    );
                }
                (resource.clone(), needed)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_without_refund() {
        assert_eq!(simulate_crafts(0, 16, 0.0, 100), 0);
        assert_eq!(simulate_crafts(15, 16, 0.0, 100), 0);
        assert_eq!(simulate_crafts(32, 16, 0.0, 100), 2);
        assert_eq!(simulate_crafts(47, 16, 0.0, 100), 2);
    }

    #[test]
    fn test_simulation_with_refund() {
        // 16 per craft, refund floor(0.248 * 16) = 3
        assert_eq!(simulate_crafts(16, 16, 0.248, 100), 1);
        assert_eq!(simulate_crafts(29, 16, 0.248, 100), 2);
        assert_eq!(simulate_crafts(28, 16, 0.248, 100), 1);
    }

    #[test]
    fn test_simulation_full_refund_stops_at_limit() {
        assert_eq!(simulate_crafts(16, 16, 1.0, 5), 6);
    }

    #[test]
    fn test_gross_requirement_minimal() {
        assert_eq!(gross_requirement(0, 16, 0.5), Some(0));
        assert_eq!(gross_requirement(1, 16, 0.248), Some(16));
        assert_eq!(gross_requirement(2, 16, 0.248), Some(29));
        assert_eq!(gross_requirement(10, 8, 0.0), Some(80));

        for amount in [1, 7, 50, 333] {
            let stock = gross_requirement(amount, 24, 0.367).unwrap();
            assert_eq!(simulate_crafts(stock, 24, 0.367, amount), amount);
            assert!(simulate_crafts(stock - 1, 24, 0.367, amount) < amount);
        }
    }

    #[test]
    fn test_simulation_matches_step_by_step_crafting() {
        for (per_craft, return_rate) in [(16, 0.0), (16, 0.248), (24, 0.367), (5, 0.5)] {
            let refund = (return_rate * f64::from(per_craft)).floor() as u64;
            for stock in 0..200u64 {
                let mut left = stock;
                let mut crafts = 0;
                while left >= u64::from(per_craft) {
                    left = left - u64::from(per_craft) + refund;
                    crafts += 1;
                }
                assert_eq!(simulate_crafts(stock, per_craft, return_rate, 1000), crafts);
            }
        }
    }

    #[test]
    fn test_gross_requirement_huge_amount() {
        let amount = 10_000_000_000;
        // refund floor(0.248 * 16) = 3, net 13 per craft
        let stock = gross_requirement(amount, 16, 0.248).unwrap();
        assert_eq!(stock, amount * 13 + 3);
        assert_eq!(simulate_crafts(stock, 16, 0.248, amount), amount);
        assert!(simulate_crafts(stock - 1, 16, 0.248, amount) < amount);
    }

    #[test]
    fn test_gross_requirement_full_refund_unavailable() {
        assert_eq!(gross_requirement(3, 16, 1.0), None);
    }

    #[test]
    fn test_recipe_requirements() {
        let resources = [("bar".to_string(), 16), ("cloth".to_string(), 8)]
            .into_iter()
            .collect();
        let recipe = Recipe::new("armor", resources).unwrap();

        let zero = recipe.requirements(0, 0.152).unwrap();
        assert!(zero.values().all(|v| *v == Some(0)));

        let req = recipe.requirements(3, 0.0).unwrap();
        assert_eq!(req["bar"], Some(48));
        assert_eq!(req["cloth"], Some(24));

        assert!(recipe.requirements(3, -0.1).is_err());
    }
}
