//! Price-evolution modeling: model arithmetic, historical derivation, and
//! the cached per-carrier provider

pub mod evolution;
pub mod history;
pub mod provider;

pub use evolution::PriceEvolutionModel;
pub use history::{ModelWeights, MonthlyPoint};
pub use provider::{
    default_model, CsvSeriesFetcher, FetchError, HistoricalModelProvider, OfflineFetcher,
    ProviderStats, SeriesFetcher, StaticSeriesFetcher,
};
