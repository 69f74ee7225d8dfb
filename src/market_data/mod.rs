pub mod loader;
pub mod price_table;

// Re-export the working set (e.g. `use crate::market_data::PriceTable`).
pub use loader::load;
pub use price_table::PriceTable;
