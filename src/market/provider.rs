//! Cached provider of price-evolution models per energy carrier
//!
//! The provider owns the only I/O seam of the engine: a `SeriesFetcher`
//! pulls the monthly price history of a carrier from wherever it lives
//! (statistical API, CSV export, in-memory fixture). Derived models are
//! cached with a TTL; any miss path (transport failure, short or degenerate
//! history) falls through to a static default model for the carrier instead
//! of propagating an error.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use log::{debug, warn};
use thiserror::Error;

use crate::reference::energy::EnergyCarrier;

use super::evolution::PriceEvolutionModel;
use super::history::{derive_model, ModelWeights, MonthlyPoint};

/// Default cache lifetime for a derived model
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Failure to obtain a usable monthly series
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport failure for {carrier}: {message}")]
    Transport {
        carrier: &'static str,
        message: String,
    },

    #[error("malformed series payload: {0}")]
    Malformed(String),

    #[error("no series source configured for {0}")]
    Unavailable(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Source of monthly price series, one per carrier
///
/// Implementations own their transport and timeout; the provider only sees
/// the rows or the error.
pub trait SeriesFetcher: Send + Sync {
    fn fetch(&self, carrier: EnergyCarrier) -> Result<Vec<MonthlyPoint>, FetchError>;
}

impl SeriesFetcher for Box<dyn SeriesFetcher> {
    fn fetch(&self, carrier: EnergyCarrier) -> Result<Vec<MonthlyPoint>, FetchError> {
        (**self).fetch(carrier)
    }
}

/// Structural long-run growth prior per carrier, in % per year
///
/// Inflation plus a structural term: electricity sits below gas because
/// renewable capacity keeps entering the mix while gas demand tightens.
pub fn structural_prior(carrier: EnergyCarrier) -> f64 {
    match carrier {
        EnergyCarrier::Electricity => 2.5,
        EnergyCarrier::Gas => 4.0,
        EnergyCarrier::Oil => 3.5,
        EnergyCarrier::Lpg => 3.5,
        EnergyCarrier::Pellets => 3.0,
        EnergyCarrier::Wood => 2.5,
    }
}

/// Static fallback model per carrier, used whenever derivation fails
pub fn default_model(carrier: EnergyCarrier) -> PriceEvolutionModel {
    match carrier {
        EnergyCarrier::Electricity => PriceEvolutionModel::new(6.0, 2.5),
        EnergyCarrier::Gas => PriceEvolutionModel::new(8.0, 4.0),
        EnergyCarrier::Oil => PriceEvolutionModel::new(5.0, 3.5),
        EnergyCarrier::Lpg => PriceEvolutionModel::new(5.5, 3.5),
        EnergyCarrier::Pellets => PriceEvolutionModel::new(4.0, 3.0),
        EnergyCarrier::Wood => PriceEvolutionModel::new(3.0, 2.5),
    }
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    model: PriceEvolutionModel,
    fetched_at: Instant,
}

/// Provider usage counters
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderStats {
    pub hits: u64,
    pub misses: u64,
    pub fallbacks: u64,
}

/// TTL-cached model provider over an injected series fetcher
pub struct HistoricalModelProvider<F: SeriesFetcher> {
    fetcher: F,
    weights: ModelWeights,
    ttl: Duration,
    cache: Mutex<HashMap<EnergyCarrier, CacheEntry>>,
    in_flight: Mutex<HashSet<EnergyCarrier>>,
    stats: Mutex<ProviderStats>,
}

impl<F: SeriesFetcher> HistoricalModelProvider<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_ttl(fetcher, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(fetcher: F, ttl: Duration) -> Self {
        Self {
            fetcher,
            weights: ModelWeights::default(),
            ttl,
            cache: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashSet::new()),
            stats: Mutex::new(ProviderStats::default()),
        }
    }

    pub fn with_weights(mut self, weights: ModelWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Model for a carrier, in order of preference: fresh cache entry,
    /// freshly derived, stale entry, static default. Never fails.
    pub fn model_for(&self, carrier: EnergyCarrier) -> PriceEvolutionModel {
        let stale = {
            let cache = self.cache.lock().unwrap();
            match cache.get(&carrier) {
                Some(entry) if entry.fetched_at.elapsed() < self.ttl => {
                    self.stats.lock().unwrap().hits += 1;
                    debug!("price model cache hit for {}", carrier.as_str());
                    return entry.model;
                }
                Some(entry) => Some(entry.model),
                None => None,
            }
        };

        // Coalesce refreshes: if another caller is already fetching this
        // carrier, serve the stale entry (or the default) without blocking.
        {
            let mut in_flight = self.in_flight.lock().unwrap();
            if !in_flight.insert(carrier) {
                return stale.unwrap_or_else(|| default_model(carrier));
            }
        }

        self.stats.lock().unwrap().misses += 1;
        let model = self.refresh(carrier, stale);
        self.in_flight.lock().unwrap().remove(&carrier);
        model
    }

    /// Fetch and derive without holding any lock, then publish the result
    fn refresh(&self, carrier: EnergyCarrier, stale: Option<PriceEvolutionModel>) -> PriceEvolutionModel {
        let derived = match self.fetcher.fetch(carrier) {
            Ok(points) => derive_model(&points, structural_prior(carrier), &self.weights),
            Err(err) => {
                warn!("series fetch failed for {}: {}", carrier.as_str(), err);
                None
            }
        };

        match derived {
            Some(model) => {
                self.cache.lock().unwrap().insert(
                    carrier,
                    CacheEntry {
                        model,
                        fetched_at: Instant::now(),
                    },
                );
                model
            }
            None => {
                self.stats.lock().unwrap().fallbacks += 1;
                match stale {
                    Some(model) => {
                        warn!(
                            "keeping stale price model for {} after failed refresh",
                            carrier.as_str()
                        );
                        model
                    }
                    None => {
                        warn!("using default price model for {}", carrier.as_str());
                        default_model(carrier)
                    }
                }
            }
        }
    }

    /// Drop all cached entries
    pub fn clear(&self) {
        self.cache.lock().unwrap().clear();
    }

    pub fn stats(&self) -> ProviderStats {
        *self.stats.lock().unwrap()
    }
}

/// Fetcher serving pre-loaded in-memory series
///
/// Used as a fixture in tests and wherever a caller already holds the rows.
#[derive(Debug, Default)]
pub struct StaticSeriesFetcher {
    series: HashMap<EnergyCarrier, Vec<MonthlyPoint>>,
}

impl StaticSeriesFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, carrier: EnergyCarrier, points: Vec<MonthlyPoint>) -> Self {
        self.series.insert(carrier, points);
        self
    }
}

impl SeriesFetcher for StaticSeriesFetcher {
    fn fetch(&self, carrier: EnergyCarrier) -> Result<Vec<MonthlyPoint>, FetchError> {
        self.series
            .get(&carrier)
            .cloned()
            .ok_or(FetchError::Unavailable(carrier.as_str()))
    }
}

/// Fetcher with no source at all; every lookup degrades to the defaults
#[derive(Debug, Default)]
pub struct OfflineFetcher;

impl SeriesFetcher for OfflineFetcher {
    fn fetch(&self, carrier: EnergyCarrier) -> Result<Vec<MonthlyPoint>, FetchError> {
        Err(FetchError::Unavailable(carrier.as_str()))
    }
}

/// Fetcher reading `<dir>/<carrier>.csv` files with `month,price` rows
///
/// Months are ISO dates (`2021-03-01`) or year-months (`2021-03`).
#[derive(Debug, Clone)]
pub struct CsvSeriesFetcher {
    dir: PathBuf,
}

impl CsvSeriesFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SeriesFetcher for CsvSeriesFetcher {
    fn fetch(&self, carrier: EnergyCarrier) -> Result<Vec<MonthlyPoint>, FetchError> {
        let path = self.dir.join(format!("{}.csv", carrier.as_str()));
        let mut reader = csv::Reader::from_path(&path).map_err(FetchError::from)?;

        let mut points = Vec::new();
        for result in reader.records() {
            let record = result?;
            let month_field = record
                .get(0)
                .ok_or_else(|| FetchError::Malformed("missing month column".to_string()))?;
            let month = NaiveDate::parse_from_str(month_field, "%Y-%m-%d")
                .or_else(|_| {
                    NaiveDate::parse_from_str(&format!("{}-01", month_field), "%Y-%m-%d")
                })
                .map_err(|e| FetchError::Malformed(format!("bad month '{}': {}", month_field, e)))?;
            let price: f64 = record
                .get(1)
                .ok_or_else(|| FetchError::Malformed("missing price column".to_string()))?
                .parse()
                .map_err(|e| FetchError::Malformed(format!("bad price: {}", e)))?;
            points.push(MonthlyPoint { month, price });
        }
        Ok(points)
    }
}
