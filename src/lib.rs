pub mod cli;
pub mod crafter;
pub mod engine;
pub mod error;
pub mod interface;
pub mod models;
pub mod table;

pub use error::{CraftError, Result};
pub use models::{CraftRecord, Recipe, Slot};
pub use table::KeyedTable;
