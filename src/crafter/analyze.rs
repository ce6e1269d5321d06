use strsim::jaro_winkler;

use crate::crafter::aggregate::{COL_ENCH, COL_TIER};
use crate::error::{CraftError, Result};
use crate::table::KeyedTable;

/// Minimum similarity for an item name suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Maximum number of suggestions returned.
const MAX_SUGGESTIONS: usize = 5;

/// Filter and sort options for [`analyze`].
#[derive(Debug, Clone, Default)]
pub struct AnalyzeQuery {
    pub item: Option<String>,
    pub tier: Option<i32>,
    pub ench: Option<i32>,
    pub sort_by: Option<String>,
    pub descending: bool,
    pub top: Option<usize>,
}

/// Item name of an aggregate row label (`"{item} {tier}.{ench}"`).
pub fn item_of(label: &str) -> &str {
    label.rsplit_once(' ').map(|(item, _)| item).unwrap_or(label)
}

/// Filter, sort and cut an aggregate table.
pub fn analyze(table: &KeyedTable, query: &AnalyzeQuery) -> Result<KeyedTable> {
    for (needed, column) in [(query.tier.is_some(), COL_TIER), (query.ench.is_some(), COL_ENCH)] {
        if needed && table.get_column(column).is_none() {
            return Err(CraftError::Schema(format!("table has no '{}' column", column)));
        }
    }

    let mut result = table.clone();
    result.retain_rows(|row| {
        let item_ok = query
            .item
            .as_deref()
            .is_none_or(|item| item_of(row.label()).eq_ignore_ascii_case(item));
        let tier_ok = query
            .tier
            .is_none_or(|tier| row.get(COL_TIER) == Some(f64::from(tier)));
        let ench_ok = query
            .ench
            .is_none_or(|ench| row.get(COL_ENCH) == Some(f64::from(ench)));
        item_ok && tier_ok && ench_ok
    });

    if let Some(column) = &query.sort_by {
        result.sort_rows_by_column(column, query.descending)?;
    }
    if let Some(n) = query.top {
        result.truncate_rows(n);
    }

    log::debug!("Analysis kept {} of {} rows", result.len(), table.len());
    Ok(result)
}

/// Item names in `table` that look like `name`, best match first.
pub fn suggest_items(table: &KeyedTable, name: &str) -> Vec<String> {
    let needle = name.to_lowercase();
    let mut items: Vec<&str> = table.rows().iter().map(|label| item_of(label)).collect();
    items.sort_unstable();
    items.dedup();

    let mut candidates: Vec<(&str, f64)> = items
        .into_iter()
        .map(|item| (item, jaro_winkler(&item.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .collect();
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    candidates
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(item, _)| item.to_string())
        .collect()
}
