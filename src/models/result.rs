use std::collections::BTreeMap;

/// Metrics for one recipe at one `tier.ench`. `None` marks an unavailable figure.
#[derive(Debug, Clone, PartialEq)]
pub struct CraftRecord {
    pub item: String,
    pub tier: i32,
    pub ench: i32,

    pub cost_price: Option<f64>,
    pub item_value: f64,
    pub fame: f64,
    pub focus: Option<f64>,
    pub journals_amount: f64,

    /// Present only when journal prices were supplied.
    pub journals_buying: Option<f64>,
    pub journals_selling: Option<f64>,

    /// Present only when sell prices were supplied.
    pub sell_price: Option<f64>,
    pub absolute_profit: Option<f64>,
    pub relative_profit: Option<f64>,
    pub profit_per_focus: Option<f64>,
}

impl CraftRecord {
    /// Row label in the aggregate table: `"{item} {tier}.{ench}"`.
    pub fn key(&self) -> String {
        format!("{} {}.{}", self.item, self.tier, self.ench)
    }
}

/// A per-unit record scaled to a target craft count.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub item: String,
    pub tier: i32,
    pub ench: i32,
    pub amount: u64,

    /// Gross units of each resource to buy.
    pub resources: BTreeMap<String, Option<u64>>,

    pub total_cost: Option<f64>,
    pub total_fame: f64,
    pub total_focus: Option<f64>,
    pub total_profit: Option<f64>,
}
