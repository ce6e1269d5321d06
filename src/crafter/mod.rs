pub mod aggregate;
pub mod analyze;
pub mod config;
pub mod market;

pub use aggregate::{records_to_table, result_columns, Crafter};
pub use analyze::{analyze, item_of, suggest_items, AnalyzeQuery};
pub use config::{load_document, parse_recipes, CraftConfig};
pub use market::{JournalPrices, MarketData, MarketFiles, MarketInputs};
