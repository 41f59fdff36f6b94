mod chart;
mod coffee;
mod table;

pub use chart::*;
pub use coffee::*;
pub use table::Table;
