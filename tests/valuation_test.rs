#[macro_use]
extern crate assert_float_eq;

use std::collections::{BTreeMap, HashMap};

use craft_calculator_rs::engine::{simulate_crafts, CostParams, GameConstants, GameData};
use craft_calculator_rs::models::{Recipe, Slot};
use craft_calculator_rs::{CraftError, KeyedTable};

fn make_recipe(name: &str, resources: &[(&str, u32)]) -> Recipe {
    let resources: BTreeMap<String, u32> =
        resources.iter().map(|(k, v)| (k.to_string(), *v)).collect();
    Recipe::new(name, resources).unwrap()
}

fn one_row_table(row: &str, cells: &[(&str, f64)]) -> KeyedTable {
    let mut table = KeyedTable::with_columns(cells.iter().map(|(k, _)| *k)).unwrap();
    let values: HashMap<String, f64> = cells.iter().map(|(k, v)| (k.to_string(), *v)).collect();
    table.add_row(row, &values).unwrap();
    table
}

fn game_data() -> GameData {
    let artifacts = one_row_table("item_value", &[("crest", 100.0)]);
    let focus = one_row_table("6.0", &[("head", 1200.0)]);
    GameData::new(GameConstants::default(), artifacts, focus).unwrap()
}

#[test]
fn test_plain_cost_price_scenario() {
    let data = game_data();
    let recipe = make_recipe("boots", &[("wood", 10), ("ore", 5)]);
    let prices = one_row_table("4.0", &[("wood", 2.0), ("ore", 3.0)]);

    let cost = recipe
        .cost_price(&data, 4, 0, &prices, None, CostParams::default())
        .unwrap()
        .unwrap();
    assert_float_absolute_eq!(cost, 35.0, 1e-9);

    let params = CostParams::new(0.0, 0.248).unwrap();
    let cost = recipe
        .cost_price(&data, 4, 0, &prices, None, params)
        .unwrap()
        .unwrap();
    assert_float_absolute_eq!(cost, 35.0 * (1.0 - 0.248), 1e-9);
}

#[test]
fn test_royal_recipe_consumes_sixteen_artifacts_at_tier_six() {
    let data = game_data();
    let recipe = make_recipe("royal cowl", &[("cloth", 8)])
        .with_slot(Slot::Head)
        .with_artifact("crest")
        .royal()
        .unwrap();

    assert_eq!(recipe.artifact_amount(&data.constants, 2).unwrap(), 16);

    // resources: 8 * 2 * 2^5 = 512; artifacts: 16 * 100 * 2^2 = 6400
    let value = recipe.item_value(&data, 6, 0).unwrap();
    assert_float_absolute_eq!(value, 6912.0, 1e-9);

    let resources = one_row_table("6.0", &[("cloth", 10.0)]);
    let artifacts = one_row_table("6", &[("crest", 50.0)]);
    let cost = recipe
        .cost_price(&data, 6, 0, &resources, Some(&artifacts), CostParams::default())
        .unwrap()
        .unwrap();
    assert_float_absolute_eq!(cost, 80.0 + 16.0 * 50.0, 1e-9);
}

#[test]
fn test_unavailable_iff_price_missing() {
    let data = game_data();
    let recipe = make_recipe("helm", &[("bar", 8)]).with_artifact("crest");
    let resources = one_row_table("6.0", &[("bar", 10.0)]);
    let artifacts = one_row_table("6", &[("crest", 50.0)]);
    let params = CostParams::default();

    // everything present
    assert!(recipe
        .cost_price(&data, 6, 0, &resources, Some(&artifacts), params)
        .unwrap()
        .is_some());

    // artifact table absent
    assert!(recipe
        .cost_price(&data, 6, 0, &resources, None, params)
        .unwrap()
        .is_none());

    // artifact row absent
    let wrong_tier = one_row_table("7", &[("crest", 50.0)]);
    assert!(recipe
        .cost_price(&data, 6, 0, &resources, Some(&wrong_tier), params)
        .unwrap()
        .is_none());

    // resource row absent
    assert!(recipe
        .cost_price(&data, 6, 1, &resources, Some(&artifacts), params)
        .unwrap()
        .is_none());
}

#[test]
fn test_boundaries() {
    let data = game_data();
    let recipe = make_recipe("boots", &[("leather", 8)]);
    let c = &data.constants;

    for (tier, ench) in [(4, 0), (8, 0), (4, 3), (8, 3)] {
        assert!(recipe.item_value(&data, tier, ench).is_ok());
        assert!(recipe.fame(c, tier, ench).is_ok());
    }

    assert!(matches!(
        recipe.fame(c, c.max_tier + 1, 0),
        Err(CraftError::Range { .. })
    ));
    assert!(matches!(
        recipe.item_value(&data, 4, c.min_ench - 1),
        Err(CraftError::Range { .. })
    ));

    let prices = one_row_table("9.0", &[("leather", 1.0)]);
    assert!(matches!(
        recipe.cost_price(&data, 9, 0, &prices, None, CostParams::default()),
        Err(CraftError::Range { .. })
    ));
}

#[test]
fn test_formulas_are_deterministic() {
    let data = game_data();
    let recipe = make_recipe("boots", &[("leather", 8), ("cloth", 4)]).with_artifact("crest");

    for (tier, ench) in data.constants.levels() {
        let a = recipe.item_value(&data, tier, ench).unwrap();
        let b = recipe.item_value(&data, tier, ench).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());

        let a = recipe.fame(&data.constants, tier, ench).unwrap();
        let b = recipe.fame(&data.constants, tier, ench).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn test_focus_cost_with_masteries() {
    let data = game_data();
    let recipe = make_recipe("royal cowl", &[("cloth", 8)]).with_slot(Slot::Head);

    let full = recipe.focus_cost(&data, 6, 0, 0.0).unwrap();
    let reduced = recipe.focus_cost(&data, 6, 0, 20000.0).unwrap();
    assert_float_absolute_eq!(full, 1200.0, 1e-9);
    assert_float_absolute_eq!(reduced, 300.0, 1e-9);
}

#[test]
fn test_requirements_roundtrip() {
    let recipe = make_recipe("armor", &[("bar", 16), ("cloth", 8)]);

    for return_rate in [0.0, 0.152, 0.248, 0.435] {
        for amount in [0, 1, 2, 17, 100] {
            let requirements = recipe.requirements(amount, return_rate).unwrap();
            for (resource, needed) in &requirements {
                let per_craft = recipe.resources[resource];
                let stock = needed.unwrap();
                assert_eq!(simulate_crafts(stock, per_craft, return_rate, amount), amount);
            }
        }
    }

    let zero = recipe.requirements(0, 0.3).unwrap();
    assert_eq!(zero["bar"], Some(0));
    assert_eq!(zero["cloth"], Some(0));
}
