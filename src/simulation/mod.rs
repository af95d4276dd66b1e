//! Cost calculators, DHW scenarios, projection, payback and financing

pub mod costs;
pub mod dhw;
pub mod engine;
pub mod financing;
pub mod result;
pub mod roi;

pub use dhw::{DhwCosts, DhwScenario};
pub use engine::{ProjectionEngine, YearRecord};
pub use financing::FinancingResult;
pub use result::{SimulationResult, YearOneCosts};
