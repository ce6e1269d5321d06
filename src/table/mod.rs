mod keyed;
mod persistence;

pub use keyed::{KeyedTable, Line};
pub use persistence::{read_table, read_table_from, write_table, write_table_to};

/// Row key used by resource, focus and sell-price tables.
pub fn level_key(tier: i32, ench: i32) -> String {
    format!("{}.{}", tier, ench)
}

/// Row key used by artifact and journal tables.
pub fn tier_key(tier: i32) -> String {
    tier.to_string()
}
