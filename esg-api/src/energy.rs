use crate::{company::CompanyProfile, error::Result, period::ReportingPeriod};
use esg_utils::parse::parse_numeric;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Discriminant telling which data array a metric series carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    YearlySeries,
    List,
}

/// One `{year, value, numeric_value, unit}` entry of a yearly series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyValue {
    #[serde(deserialize_with = "crate::de::int_or_string")]
    pub year: i32,
    /// Display form as sent by the backend, e.g. "1,250.5"
    #[serde(default, deserialize_with = "crate::de::string_or_number")]
    pub value: String,
    #[serde(default)]
    pub numeric_value: Option<f64>,
    #[serde(default)]
    pub unit: String,
}

impl YearlyValue {
    /// Numeric reading: `numeric_value`, else the parsed display value, else 0.
    pub fn numeric(&self) -> f64 {
        self.numeric_value
            .filter(|v| v.is_finite())
            .or_else(|| parse_numeric(&self.value))
            .unwrap_or(0.0)
    }
}

/// A discrete entry of a `list` series (e.g. an energy-saving initiative).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListItem {
    pub label: String,
    #[serde(deserialize_with = "crate::de::string_or_number")]
    pub value: String,
    pub unit: String,
}

/// Payload of a metric series; exactly one shape per series.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricData {
    Yearly(Vec<YearlyValue>),
    List(Vec<ListItem>),
}

/// A named energy metric, e.g. "Coal Consumption".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMetricSeries", into = "RawMetricSeries")]
pub struct EnergyMetricSeries {
    pub name: String,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub data: MetricData,
}

/// Wire form of [`EnergyMetricSeries`].
#[derive(Serialize, Deserialize)]
struct RawMetricSeries {
    #[serde(default)]
    name: String,
    data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    yearly_data: Option<Vec<YearlyValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    list_data: Option<Vec<ListItem>>,
}

impl TryFrom<RawMetricSeries> for EnergyMetricSeries {
    type Error = String;

    fn try_from(raw: RawMetricSeries) -> std::result::Result<Self, Self::Error> {
        // An empty array for the shape data_type does not select counts as absent.
        let (yearly_data, list_data) = match raw.data_type {
            DataType::YearlySeries => (raw.yearly_data, raw.list_data.filter(|l| !l.is_empty())),
            DataType::List => (raw.yearly_data.filter(|y| !y.is_empty()), raw.list_data),
        };
        let data = match (raw.data_type, yearly_data, list_data) {
            (DataType::YearlySeries, Some(yearly), None) => MetricData::Yearly(yearly),
            (DataType::List, None, Some(list)) => MetricData::List(list),
            (data_type, yearly, list) => {
                return Err(format!(
                    "metric {:?} has data_type {:?} but yearly_data is {} and list_data is {}",
                    raw.name,
                    data_type,
                    if yearly.is_some() { "present" } else { "absent" },
                    if list.is_some() { "present" } else { "absent" },
                ))
            }
        };
        Ok(EnergyMetricSeries {
            name: raw.name,
            unit: raw.unit,
            description: raw.description,
            data,
        })
    }
}

impl From<EnergyMetricSeries> for RawMetricSeries {
    fn from(series: EnergyMetricSeries) -> Self {
        let (data_type, yearly_data, list_data) = match series.data {
            MetricData::Yearly(y) => (DataType::YearlySeries, Some(y), None),
            MetricData::List(l) => (DataType::List, None, Some(l)),
        };
        RawMetricSeries {
            name: series.name,
            data_type,
            unit: series.unit,
            description: series.description,
            yearly_data,
            list_data,
        }
    }
}

impl EnergyMetricSeries {
    pub fn data_type(&self) -> DataType {
        match self.data {
            MetricData::Yearly(_) => DataType::YearlySeries,
            MetricData::List(_) => DataType::List,
        }
    }

    pub fn yearly(&self) -> &[YearlyValue] {
        match &self.data {
            MetricData::Yearly(values) => values,
            MetricData::List(_) => &[],
        }
    }

    /// Entry for `year`, if the series reports one.
    pub fn for_year(&self, year: i32) -> Option<&YearlyValue> {
        self.yearly().iter().find(|v| v.year == year)
    }

    /// Entry with the highest year.
    pub fn latest(&self) -> Option<&YearlyValue> {
        self.yearly().iter().max_by_key(|v| v.year)
    }
}

/// Renewable and fossil shares of total energy, with per-source breakdowns.
///
/// Either sent by the backend as `energy_mix` or derived client-side from
/// the raw environmental metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivedEnergyMix {
    pub total_renewable: f64,
    pub total_fossil: f64,
    pub renewable_percentage: f64,
    pub fossil_percentage: f64,
    pub renewable_breakdown: RenewableBreakdown,
    pub fossil_breakdown: FossilBreakdown,
}

/// Share of each renewable source within the renewable total, in percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenewableBreakdown {
    pub bagasse: f64,
    pub solar: f64,
    pub other: f64,
}

/// Share of each fossil source within the fossil total, in percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FossilBreakdown {
    pub coal: f64,
    pub diesel: f64,
    pub petrol: f64,
    pub other: f64,
}

/// Electricity generated on site versus bought from and sold to the grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivedGridOperations {
    pub generated: f64,
    pub purchased: f64,
    pub exported: f64,
    /// generated / (generated + purchased) * 100
    pub self_sufficiency: f64,
    /// purchased / (generated + purchased) * 100
    pub grid_dependency: f64,
    /// purchased - exported
    pub net_import: f64,
}

/// Headline indicators as computed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyKpis {
    pub total_energy_gj: Option<f64>,
    pub renewable_share_percent: Option<f64>,
    pub energy_intensity_gj_per_tonne: Option<f64>,
    pub emissions_tco2e: Option<f64>,
    pub energy_cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyTrendPoint {
    #[serde(deserialize_with = "crate::de::int_or_string")]
    pub year: i32,
    #[serde(default)]
    pub total_energy_gj: f64,
    #[serde(default)]
    pub renewable_gj: f64,
    #[serde(default)]
    pub fossil_gj: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyTrends {
    pub yearly: Vec<EnergyTrendPoint>,
    pub summary: Option<String>,
}

/// `GET /esg-dashboard/energy-renewables/{companyId}?year={year}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyConsumptionResponse {
    #[serde(default)]
    pub company: CompanyProfile,
    pub reporting_period: ReportingPeriod,
    /// Raw environmental metrics keyed by metric name
    #[serde(default)]
    pub environmental: BTreeMap<String, EnergyMetricSeries>,
    #[serde(default)]
    pub energy_mix: Option<DerivedEnergyMix>,
    #[serde(default)]
    pub grid_operations: Option<DerivedGridOperations>,
    #[serde(default)]
    pub kpis: EnergyKpis,
    #[serde(default)]
    pub trends: EnergyTrends,
}

impl EnergyConsumptionResponse {
    pub fn metric(&self, name: &str) -> Option<&EnergyMetricSeries> {
        self.environmental.get(name)
    }
}

/// Parse and validate an energy-renewables response body.
pub fn parse_energy_response(body: &str) -> Result<EnergyConsumptionResponse> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ENERGY_FIXTURE;

    #[test]
    fn test_parse_fixture() {
        let response = parse_energy_response(ENERGY_FIXTURE).unwrap();
        assert_eq!(response.reporting_period.year, 2024);
        assert_eq!(response.company.name, "Kilombero Sugar Estates");
        let coal = response.metric("Coal Consumption").unwrap();
        assert_eq!(coal.data_type(), DataType::YearlySeries);
        assert_eq!(coal.for_year(2024).unwrap().numeric(), 500.0);
        let initiatives = response.metric("Energy Efficiency Initiatives").unwrap();
        assert_eq!(initiatives.data_type(), DataType::List);
        assert!(initiatives.yearly().is_empty());
        assert!(response.energy_mix.is_none());
    }

    #[test]
    fn test_series_with_empty_counterpart_accepted() {
        let body = r#"{
            "name": "Solar Energy Generation",
            "data_type": "yearly_series",
            "yearly_data": [{"year": 2024, "value": "400"}],
            "list_data": []
        }"#;
        let series = serde_json::from_str::<EnergyMetricSeries>(body).unwrap();
        assert_eq!(series.data_type(), DataType::YearlySeries);
        assert_eq!(series.for_year(2024).unwrap().numeric(), 400.0);

        let body = r#"{
            "name": "Initiatives",
            "data_type": "list",
            "yearly_data": [],
            "list_data": [{"label": "LED retrofit", "value": "120", "unit": "MWh"}]
        }"#;
        let series = serde_json::from_str::<EnergyMetricSeries>(body).unwrap();
        assert_eq!(series.data_type(), DataType::List);
    }

    #[test]
    fn test_series_with_populated_counterpart_rejected() {
        let body = r#"{
            "name": "Solar Energy Generation",
            "data_type": "yearly_series",
            "yearly_data": [{"year": 2024, "value": "400"}],
            "list_data": [{"label": "Panels", "value": "12", "unit": "units"}]
        }"#;
        let err = serde_json::from_str::<EnergyMetricSeries>(body).unwrap_err();
        assert!(err.to_string().contains("Solar Energy Generation"));
    }

    #[test]
    fn test_series_missing_declared_array_rejected() {
        let body = r#"{"name": "Initiatives", "data_type": "list"}"#;
        assert!(serde_json::from_str::<EnergyMetricSeries>(body).is_err());
    }

    #[test]
    fn test_unknown_data_type_rejected() {
        let body = r#"{"name": "x", "data_type": "matrix", "list_data": []}"#;
        assert!(serde_json::from_str::<EnergyMetricSeries>(body).is_err());
    }

    #[test]
    fn test_numeric_fallbacks() {
        let parsed = YearlyValue {
            year: 2024,
            value: "1,250.5".to_string(),
            numeric_value: None,
            unit: "GJ".to_string(),
        };
        assert_eq!(parsed.numeric(), 1250.5);

        let explicit = YearlyValue {
            numeric_value: Some(10.0),
            ..parsed.clone()
        };
        assert_eq!(explicit.numeric(), 10.0);

        let missing = YearlyValue {
            value: "N/A".to_string(),
            numeric_value: None,
            ..parsed
        };
        assert_eq!(missing.numeric(), 0.0);
    }

    #[test]
    fn test_series_serializes_wire_form() {
        let response = parse_energy_response(ENERGY_FIXTURE).unwrap();
        let coal = response.metric("Coal Consumption").unwrap();
        let json = serde_json::to_value(coal).unwrap();
        assert_eq!(json["data_type"], "yearly_series");
        assert!(json.get("list_data").is_none());
    }

    #[test]
    fn test_latest_picks_highest_year() {
        let response = parse_energy_response(ENERGY_FIXTURE).unwrap();
        let coal = response.metric("Coal Consumption").unwrap();
        assert_eq!(coal.latest().unwrap().year, 2024);
    }
}
