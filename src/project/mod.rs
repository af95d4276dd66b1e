//! Project input data structures and loading

pub mod data;
pub mod loader;

pub use data::{
    DhwConfig, EmitterType, FinancingMode, FinancingTerms, HeatPumpCategory, HeatPumpSpec,
    InputError, InsulationQuality, ProjectInput,
};
pub use loader::{load_project, parse_project};
