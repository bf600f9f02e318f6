//! Where dashboard responses come from: the live API or a saved JSON file.

use esg_api::client::EsgClient;
use esg_api::{
    parse_energy_response, parse_soil_response, ApiError, EnergyConsumptionResponse,
    SoilHealthCarbonResponse,
};
use log::info;
use std::future::Future;
use std::path::PathBuf;

pub trait DashboardSource {
    fn energy(
        &self,
        company_id: &str,
        year: i32,
    ) -> impl Future<Output = Result<EnergyConsumptionResponse, ApiError>> + Send;

    fn soil(
        &self,
        company_id: &str,
        year: i32,
    ) -> impl Future<Output = Result<SoilHealthCarbonResponse, ApiError>> + Send;
}

impl DashboardSource for EsgClient {
    fn energy(
        &self,
        company_id: &str,
        year: i32,
    ) -> impl Future<Output = Result<EnergyConsumptionResponse, ApiError>> + Send {
        self.energy_renewables(company_id, year)
    }

    fn soil(
        &self,
        company_id: &str,
        year: i32,
    ) -> impl Future<Output = Result<SoilHealthCarbonResponse, ApiError>> + Send {
        self.soil_health_carbon(company_id, year)
    }
}

/// A response previously saved to disk. The company and year are ignored;
/// the file is validated exactly like a live response body.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    async fn read(&self) -> Result<String, ApiError> {
        info!("Reading saved response from {}", self.path.display());
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}

impl DashboardSource for FileSource {
    async fn energy(
        &self,
        _company_id: &str,
        _year: i32,
    ) -> Result<EnergyConsumptionResponse, ApiError> {
        parse_energy_response(&self.read().await?)
    }

    async fn soil(&self, _company_id: &str, _year: i32) -> Result<SoilHealthCarbonResponse, ApiError> {
        parse_soil_response(&self.read().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn fixture_path(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../fixtures")
            .join(name)
    }

    #[tokio::test]
    async fn test_file_source_reads_fixtures() {
        let energy = FileSource::new(fixture_path("energy_response.json"))
            .energy("ignored", 1999)
            .await
            .unwrap();
        assert_eq!(energy.company.id, "kse-001");

        let soil = FileSource::new(fixture_path("soil_response.json"))
            .soil("ignored", 1999)
            .await
            .unwrap();
        assert_eq!(soil.monthly_data.len(), 12);
    }

    #[tokio::test]
    async fn test_invalid_saved_response_is_schema_error() {
        let path = std::env::temp_dir().join("esg-cmd-invalid-soil.json");
        std::fs::write(
            &path,
            r#"{"reporting_period": {"year": 2024}, "monthly_data": [{"year": 2024, "month": 13}]}"#,
        )
        .unwrap();
        let result = FileSource::new(&path).soil("kse-001", 2024).await;
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(ApiError::Schema(_))));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = FileSource::new("/nonexistent/esg/response.json")
            .energy("kse-001", 2024)
            .await;
        assert!(matches!(result, Err(ApiError::Io(_))));
    }
}
