//! Heat-pump replacement economics - simulation engine for residential
//! heating-system replacement projects
//!
//! This library provides:
//! - Energy-price evolution models derived from monthly price history,
//!   with a TTL-cached provider and static fallbacks per carrier
//! - Climate-zone resolution and seasonal COP adjustment
//! - Annual cost calculators for the current system, the heat pump and
//!   the four domestic-hot-water scenarios
//! - Lifetime projection, payback/ROI and loan-amortization arithmetic
//! - A sensitivity runner bracketing the baseline under price shifts

pub mod equipment;
pub mod market;
pub mod project;
pub mod reference;
pub mod scenario;
pub mod simulation;
pub mod simulator;

// Re-export commonly used types
pub use market::{HistoricalModelProvider, PriceEvolutionModel, SeriesFetcher};
pub use project::ProjectInput;
pub use scenario::SensitivityRunner;
pub use simulation::{SimulationResult, YearRecord};
pub use simulator::Simulator;
