pub mod render;

pub use render::{display_projection, display_requirements, display_table};
