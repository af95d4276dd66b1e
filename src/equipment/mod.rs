//! Heat-pump performance and sizing models

pub mod cop;
pub mod sizing;

pub use cop::adjusted_cop;
pub use sizing::{validate_sizing, SizingAssessment};
