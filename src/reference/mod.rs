//! Static reference data: climate zones and energy conversion factors

pub mod climate;
pub mod energy;

pub use climate::{department_from_postal, zone_for_department, zone_for_postal, ClimateZone};
pub use energy::{EnergyCarrier, HeatingType};
