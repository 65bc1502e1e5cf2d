pub mod costing;
pub mod health;
pub mod import;

pub use costing::*;
pub use health::*;
pub use import::*;
