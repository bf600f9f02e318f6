//! HTTP client for the ESG dashboard backend.
//!
//! One request per call: no retries, no caching. A failed call surfaces as
//! an [`ApiError`] and it is up to the caller to try again.

use crate::{
    energy::{parse_energy_response, EnergyConsumptionResponse},
    error::{ApiError, Result},
    library_book::{LibraryBook, LibraryBookDraft},
    soil::{parse_soil_response, SoilHealthCarbonResponse},
};
use log::{debug, info};
use reqwest::{
    multipart::{Form, Part},
    Client, RequestBuilder, Response,
};
use std::time::Duration;

/// Default request timeout, applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default backend location for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Connection settings for [`EsgClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Bearer token attached to every request when present
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EsgClient {
    http: Client,
    config: ClientConfig,
}

impl EsgClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(EsgClient { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Read the body of a successful response, mapping any other status
    /// through the fixed message table.
    async fn read_body(response: Response) -> Result<String> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.text().await?);
        }
        let body = response.text().await.unwrap_or_default();
        debug!("error body for status {}: {}", status.as_u16(), body);
        Err(ApiError::from_status(status.as_u16(), &body))
    }

    /// Fetch energy consumption and renewables data for one company/year.
    pub async fn energy_renewables(
        &self,
        company_id: &str,
        year: i32,
    ) -> Result<EnergyConsumptionResponse> {
        let url = self.url(&energy_path(company_id));
        info!("Fetching energy data for {} ({})", company_id, year);
        let request = self.authorize(self.http.get(&url).query(&[("year", year)]));
        let body = Self::read_body(request.send().await?).await?;
        parse_energy_response(&body)
    }

    /// Fetch soil health and carbon data for one company/year.
    pub async fn soil_health_carbon(
        &self,
        company_id: &str,
        year: i32,
    ) -> Result<SoilHealthCarbonResponse> {
        let url = self.url(&soil_path(company_id));
        info!("Fetching soil health data for {} ({})", company_id, year);
        let request = self.authorize(self.http.get(&url).query(&[("year", year)]));
        let body = Self::read_body(request.send().await?).await?;
        parse_soil_response(&body)
    }

    /// Create a library document.
    pub async fn create_library_book(&self, draft: &LibraryBookDraft) -> Result<LibraryBook> {
        let request = self.http.post(self.url(LIBRARY_CREATE_PATH));
        self.send_library_book(request, draft).await
    }

    /// Update an existing library document.
    pub async fn update_library_book(
        &self,
        id: &str,
        draft: &LibraryBookDraft,
    ) -> Result<LibraryBook> {
        let request = self.http.put(self.url(&library_update_path(id)));
        self.send_library_book(request, draft).await
    }

    async fn send_library_book(
        &self,
        request: RequestBuilder,
        draft: &LibraryBookDraft,
    ) -> Result<LibraryBook> {
        let request = match &draft.file {
            Some(path) => {
                let bytes = tokio::fs::read(path).await?;
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "upload".to_string());
                info!("Uploading {} ({} bytes)", file_name, bytes.len());
                let mut form = Form::new();
                for (name, value) in draft.form_fields() {
                    form = form.text(name, value);
                }
                form = form.part("file", Part::bytes(bytes).file_name(file_name));
                request.multipart(form)
            }
            None => request.json(draft),
        };
        let body = Self::read_body(self.authorize(request).send().await?).await?;
        parse_library_book(&body)
    }
}

const LIBRARY_CREATE_PATH: &str = "/api/v1/library_book/create";

fn energy_path(company_id: &str) -> String {
    format!("/esg-dashboard/energy-renewables/{company_id}")
}

fn soil_path(company_id: &str) -> String {
    format!("/esg-dashboard/soil-health-carbon/{company_id}")
}

fn library_update_path(id: &str) -> String {
    format!("/api/v1/library_book/update/{id}")
}

/// Library endpoints answer either with the record itself or wrapped in
/// `{"data": {...}}`.
fn parse_library_book(body: &str) -> Result<LibraryBook> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let record = match value.get("data") {
        Some(inner) if inner.is_object() => inner.clone(),
        _ => value,
    };
    Ok(serde_json::from_value(record)?)
}
