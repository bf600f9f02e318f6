//! Response model and HTTP client for the ESG dashboard backend.
//!
//! The types in this crate mirror the JSON returned by the
//! `/esg-dashboard/*` endpoints. Deserialization doubles as runtime schema
//! validation: a series whose `data_type` disagrees with the arrays it
//! carries, a month outside 1..=12 or an inverted reporting period are
//! rejected while parsing.
//!
//! The HTTP client lives behind the `api` feature so that the model can be
//! used without pulling in `reqwest`/`tokio`.

pub mod company;
mod de;
pub mod energy;
pub mod error;
pub mod library_book;
pub mod period;
pub mod soil;

#[cfg(feature = "api")]
pub mod client;

pub use company::CompanyProfile;
pub use energy::{parse_energy_response, EnergyConsumptionResponse, EnergyMetricSeries};
pub use error::ApiError;
pub use period::ReportingPeriod;
pub use soil::{parse_soil_response, MonthlySoilSample, SoilHealthCarbonResponse};

/// Embedded energy response used by tests across the workspace.
pub static ENERGY_FIXTURE: &str = include_str!("../../fixtures/energy_response.json");

/// Embedded soil-health response used by tests across the workspace.
pub static SOIL_FIXTURE: &str = include_str!("../../fixtures/soil_response.json");
