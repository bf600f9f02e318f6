use crate::{company::CompanyProfile, error::Result, period::ReportingPeriod};
use serde::{Deserialize, Serialize};

/// One month of soil organic carbon and vegetation readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMonthlySoilSample")]
pub struct MonthlySoilSample {
    pub year: i32,
    /// 1 = January .. 12 = December
    pub month: u32,
    /// Soil organic carbon stock, tC/ha
    pub soc_tc_per_ha: f64,
    /// Peak NDVI observed during the month
    pub ndvi_max: f64,
    /// SOC expressed as CO2, t/ha
    pub soc_co2_t_per_ha: f64,
    /// Above-ground biomass carbon as CO2, t/ha
    pub biomass_co2_t_per_ha: f64,
    /// Month-over-month change of SOC stock as CO2, t
    pub delta_soc_co2_t: f64,
}

#[derive(Deserialize)]
struct RawMonthlySoilSample {
    #[serde(deserialize_with = "crate::de::int_or_string")]
    year: i32,
    month: u32,
    #[serde(default)]
    soc_tc_per_ha: Option<f64>,
    #[serde(default)]
    ndvi_max: Option<f64>,
    #[serde(default)]
    soc_co2_t_per_ha: Option<f64>,
    #[serde(default)]
    biomass_co2_t_per_ha: Option<f64>,
    #[serde(default)]
    delta_soc_co2_t: Option<f64>,
}

impl TryFrom<RawMonthlySoilSample> for MonthlySoilSample {
    type Error = String;

    fn try_from(raw: RawMonthlySoilSample) -> std::result::Result<Self, Self::Error> {
        if !(1..=12).contains(&raw.month) {
            return Err(format!("month {} of {} is out of range", raw.month, raw.year));
        }
        Ok(MonthlySoilSample {
            year: raw.year,
            month: raw.month,
            soc_tc_per_ha: raw.soc_tc_per_ha.unwrap_or_default(),
            ndvi_max: raw.ndvi_max.unwrap_or_default(),
            soc_co2_t_per_ha: raw.soc_co2_t_per_ha.unwrap_or_default(),
            biomass_co2_t_per_ha: raw.biomass_co2_t_per_ha.unwrap_or_default(),
            delta_soc_co2_t: raw.delta_soc_co2_t.unwrap_or_default(),
        })
    }
}

impl MonthlySoilSample {
    /// Short label such as "2024-03".
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

/// Yearly carbon totals reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySoilRecord {
    #[serde(deserialize_with = "crate::de::int_or_string")]
    pub year: i32,
    #[serde(default)]
    pub sequestration_tco2: f64,
    #[serde(default)]
    pub emissions_tco2: f64,
    #[serde(default)]
    pub soc_tc_per_ha: f64,
    #[serde(default)]
    pub ndvi_mean: f64,
}

/// `GET /esg-dashboard/soil-health-carbon/{companyId}?year={year}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSoilHealthCarbonResponse")]
pub struct SoilHealthCarbonResponse {
    pub company: CompanyProfile,
    pub reporting_period: ReportingPeriod,
    /// Sorted by `(year, month)`
    pub monthly_data: Vec<MonthlySoilSample>,
    /// Sorted by year
    pub yearly_data: Vec<YearlySoilRecord>,
}

#[derive(Deserialize)]
struct RawSoilHealthCarbonResponse {
    #[serde(default)]
    company: CompanyProfile,
    reporting_period: ReportingPeriod,
    #[serde(default)]
    monthly_data: Vec<MonthlySoilSample>,
    #[serde(default)]
    yearly_data: Vec<YearlySoilRecord>,
}

impl TryFrom<RawSoilHealthCarbonResponse> for SoilHealthCarbonResponse {
    type Error = String;

    fn try_from(raw: RawSoilHealthCarbonResponse) -> std::result::Result<Self, Self::Error> {
        let mut monthly_data = raw.monthly_data;
        monthly_data.sort_by_key(|s| (s.year, s.month));
        if let Some(pair) = monthly_data
            .windows(2)
            .find(|w| (w[0].year, w[0].month) == (w[1].year, w[1].month))
        {
            return Err(format!("duplicate monthly sample for {}", pair[0].label()));
        }
        let mut yearly_data = raw.yearly_data;
        yearly_data.sort_by_key(|r| r.year);
        Ok(SoilHealthCarbonResponse {
            company: raw.company,
            reporting_period: raw.reporting_period,
            monthly_data,
            yearly_data,
        })
    }
}

/// Parse and validate a soil-health-carbon response body.
pub fn parse_soil_response(body: &str) -> Result<SoilHealthCarbonResponse> {
    Ok(serde_json::from_str(body)?)
}
