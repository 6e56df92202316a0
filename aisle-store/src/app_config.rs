use aisle_catalog::{CatalogError, Flight, FlightCatalog, SeatLayout};
use chrono::NaiveDate;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub seating: SeatLayout,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// CORS origin; any origin is allowed when unset.
    pub allowed_origin: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_state_path")]
    pub path: PathBuf,
}

fn default_state_path() -> PathBuf {
    PathBuf::from("data/state.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_state_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FlightConfig {
    pub flight_number: u32,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_date: NaiveDate,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub flights: Vec<FlightConfig>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let flights = FlightCatalog::demo()
            .flights()
            .iter()
            .map(|f| FlightConfig {
                flight_number: f.flight_number,
                departure_airport: f.departure_airport.clone(),
                arrival_airport: f.arrival_airport.clone(),
                departure_date: f.departure_date,
            })
            .collect();
        Self { flights }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `AISLE_SERVER__PORT=9000`
            .add_source(environment())
            .build()?;

        s.try_deserialize()
    }

    #[cfg(test)]
    fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn flight_catalog(&self) -> Result<FlightCatalog, CatalogError> {
        let flights = self
            .catalog
            .flights
            .iter()
            .map(|f| Flight::new(f.flight_number, f.departure_airport.clone(), f.arrival_airport.clone(), f.departure_date))
            .collect();
        FlightCatalog::new(flights)
    }

    pub fn seat_layout(&self) -> Result<SeatLayout, CatalogError> {
        self.seating.validate()?;
        Ok(self.seating.clone())
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("AISLE")
        .prefix_separator("_")
        .separator("__")
}
