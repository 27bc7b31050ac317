//! Wire types exchanged with the calculation engine.

pub mod request;
pub mod result;
pub mod scaling;

pub use request::{CalculationRequest, RerollPolicy, DEFAULT_CRIT_VALUE};
pub use result::{CalcResult, Quantity, QuantityStats};
pub use scaling::{SaveNode, ToughnessNode};
