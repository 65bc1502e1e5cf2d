pub mod config;
pub mod costing;
pub mod error;
pub mod logging;
pub mod numeric;
pub mod sheet;
pub mod validation;

pub use config::*;
pub use costing::*;
pub use error::*;
pub use logging::*;
pub use numeric::*;
pub use sheet::*;
pub use validation::*;
