//! Soil-carbon derived metrics: per-field statistics, anomaly flags,
//! yearly comparison and carbon balance.

use crate::percentage;
use crate::statistics::{calculate_stats, flag_anomalies, StatisticalSummary};
use esg_api::soil::{MonthlySoilSample, SoilHealthCarbonResponse};
use serde::Serialize;
use std::fmt;

/// Monthly sample field a statistic is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilField {
    SocTcPerHa,
    NdviMax,
    SocCo2TPerHa,
    BiomassCo2TPerHa,
    DeltaSocCo2T,
}

impl SoilField {
    pub const ALL: [SoilField; 5] = [
        SoilField::SocTcPerHa,
        SoilField::NdviMax,
        SoilField::SocCo2TPerHa,
        SoilField::BiomassCo2TPerHa,
        SoilField::DeltaSocCo2T,
    ];

    pub fn value(&self, sample: &MonthlySoilSample) -> f64 {
        match self {
            SoilField::SocTcPerHa => sample.soc_tc_per_ha,
            SoilField::NdviMax => sample.ndvi_max,
            SoilField::SocCo2TPerHa => sample.soc_co2_t_per_ha,
            SoilField::BiomassCo2TPerHa => sample.biomass_co2_t_per_ha,
            SoilField::DeltaSocCo2T => sample.delta_soc_co2_t,
        }
    }

    /// Field name as it appears in the response JSON.
    pub fn key(&self) -> &'static str {
        match self {
            SoilField::SocTcPerHa => "soc_tc_per_ha",
            SoilField::NdviMax => "ndvi_max",
            SoilField::SocCo2TPerHa => "soc_co2_t_per_ha",
            SoilField::BiomassCo2TPerHa => "biomass_co2_t_per_ha",
            SoilField::DeltaSocCo2T => "delta_soc_co2_t",
        }
    }

    pub fn from_key(key: &str) -> Option<SoilField> {
        SoilField::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SoilField::SocTcPerHa => "tC/ha",
            SoilField::NdviMax => "",
            SoilField::SocCo2TPerHa | SoilField::BiomassCo2TPerHa => "tCO2/ha",
            SoilField::DeltaSocCo2T => "tCO2",
        }
    }
}

impl fmt::Display for SoilField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoilField::SocTcPerHa => write!(f, "SOC"),
            SoilField::NdviMax => write!(f, "NDVI (max)"),
            SoilField::SocCo2TPerHa => write!(f, "SOC CO2"),
            SoilField::BiomassCo2TPerHa => write!(f, "Biomass CO2"),
            SoilField::DeltaSocCo2T => write!(f, "Delta SOC CO2"),
        }
    }
}

pub fn field_values(samples: &[MonthlySoilSample], field: SoilField) -> Vec<f64> {
    samples.iter().map(|s| field.value(s)).collect()
}

pub fn field_stats(samples: &[MonthlySoilSample], field: SoilField) -> StatisticalSummary {
    calculate_stats(&field_values(samples, field))
}

/// Statistical summary for every monthly field, in [`SoilField::ALL`] order.
pub fn soil_field_stats(samples: &[MonthlySoilSample]) -> Vec<(SoilField, StatisticalSummary)> {
    SoilField::ALL
        .iter()
        .map(|field| (*field, field_stats(samples, *field)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyFlag {
    pub year: i32,
    pub month: u32,
    pub value: f64,
    pub z_score: f64,
    pub is_anomaly: bool,
}

/// z-score of each month's `field` value; `|z| > 2` is an anomaly.
/// Samples with no spread produce z = 0 everywhere and no anomalies.
pub fn detect_anomalies(samples: &[MonthlySoilSample], field: SoilField) -> Vec<AnomalyFlag> {
    let values = field_values(samples, field);
    samples
        .iter()
        .zip(values.iter())
        .zip(flag_anomalies(&values))
        .map(|((sample, value), (z_score, is_anomaly))| AnomalyFlag {
            year: sample.year,
            month: sample.month,
            value: *value,
            z_score,
            is_anomaly,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyComparison {
    pub year: i32,
    pub sequestration: f64,
    pub emissions: f64,
    pub soc: f64,
    pub ndvi: f64,
    /// sequestration - emissions
    pub net_balance: f64,
}

pub fn yearly_data_comparison(response: &SoilHealthCarbonResponse) -> Vec<YearlyComparison> {
    response
        .yearly_data
        .iter()
        .map(|record| YearlyComparison {
            year: record.year,
            sequestration: record.sequestration_tco2,
            emissions: record.emissions_tco2,
            soc: record.soc_tc_per_ha,
            ndvi: record.ndvi_mean,
            net_balance: record.sequestration_tco2 - record.emissions_tco2,
        })
        .collect()
}

/// Headline carbon figures for the soil overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CarbonBalance {
    /// Sum of monthly delta SOC, tCO2
    pub total_delta_soc_co2_t: f64,
    /// Sum of monthly biomass CO2, t/ha
    pub total_biomass_co2_t_per_ha: f64,
    pub mean_soc_tc_per_ha: f64,
    pub mean_ndvi: f64,
    /// Reporting year's yearly record, else the latest; 0 when there is none
    pub sequestration_tco2: f64,
    pub emissions_tco2: f64,
    pub net_balance_tco2: f64,
    /// sequestration / emissions * 100, 0 when emissions are 0
    pub offset_percentage: f64,
}

pub fn carbon_balance(response: &SoilHealthCarbonResponse) -> CarbonBalance {
    let monthly = &response.monthly_data;
    let yearly = &response.yearly_data;
    let (sequestration, emissions) = yearly
        .iter()
        .find(|r| r.year == response.reporting_period.year)
        .or_else(|| yearly.last())
        .map(|r| (r.sequestration_tco2, r.emissions_tco2))
        .unwrap_or_default();
    CarbonBalance {
        total_delta_soc_co2_t: field_values(monthly, SoilField::DeltaSocCo2T).iter().sum(),
        total_biomass_co2_t_per_ha: field_values(monthly, SoilField::BiomassCo2TPerHa)
            .iter()
            .sum(),
        mean_soc_tc_per_ha: field_stats(monthly, SoilField::SocTcPerHa).mean,
        mean_ndvi: field_stats(monthly, SoilField::NdviMax).mean,
        sequestration_tco2: sequestration,
        emissions_tco2: emissions,
        net_balance_tco2: sequestration - emissions,
        offset_percentage: percentage(sequestration, emissions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esg_api::{parse_soil_response, ReportingPeriod, SOIL_FIXTURE};

    fn fixture() -> SoilHealthCarbonResponse {
        parse_soil_response(SOIL_FIXTURE).unwrap()
    }

    #[test]
    fn test_delta_soc_outlier_detected() {
        let response = fixture();
        let flags = detect_anomalies(&response.monthly_data, SoilField::DeltaSocCo2T);
        assert_eq!(flags.len(), 12);
        let flagged: Vec<u32> = flags.iter().filter(|f| f.is_anomaly).map(|f| f.month).collect();
        assert_eq!(flagged, vec![8]);
        assert!(flags[7].z_score > 3.0);
    }

    #[test]
    fn test_ndvi_has_no_anomalies() {
        let response = fixture();
        let flags = detect_anomalies(&response.monthly_data, SoilField::NdviMax);
        assert!(flags.iter().all(|f| !f.is_anomaly));
    }

    #[test]
    fn test_field_keys_round_trip() {
        for field in SoilField::ALL {
            assert_eq!(SoilField::from_key(field.key()), Some(field));
        }
        assert_eq!(SoilField::from_key("ndvi"), None);
    }

    #[test]
    fn test_empty_samples() {
        assert!(detect_anomalies(&[], SoilField::SocTcPerHa).is_empty());
        let stats = soil_field_stats(&[]);
        assert_eq!(stats.len(), 5);
        assert!(stats.iter().all(|(_, s)| *s == StatisticalSummary::default()));
    }

    #[test]
    fn test_field_stats_soc() {
        let response = fixture();
        let stats = field_stats(&response.monthly_data, SoilField::SocTcPerHa);
        assert_eq!(stats.min, 40.6);
        assert_eq!(stats.max, 42.7);
        // upper-middle of 12 sorted values is the 7th (index 6)
        assert_eq!(stats.median, 41.9);
    }

    #[test]
    fn test_yearly_comparison_net_balance() {
        let comparison = yearly_data_comparison(&fixture());
        let years: Vec<i32> = comparison.iter().map(|c| c.year).collect();
        assert_eq!(years, vec![2022, 2023, 2024]);
        assert_eq!(comparison[0].net_balance, -530.0);
        assert_eq!(comparison[2].net_balance, 225.0);
    }

    #[test]
    fn test_carbon_balance() {
        let balance = carbon_balance(&fixture());
        assert_eq!(balance.sequestration_tco2, 2015.0);
        assert_eq!(balance.net_balance_tco2, 225.0);
        assert!((balance.offset_percentage - 112.569).abs() < 1e-2);
        assert!((balance.total_delta_soc_co2_t - 201.5).abs() < 1e-9);
    }

    #[test]
    fn test_carbon_balance_uses_reporting_year_record() {
        let mut response = fixture();
        response.reporting_period.year = 2022;
        let balance = carbon_balance(&response);
        assert_eq!(balance.sequestration_tco2, 1450.0);
        assert_eq!(balance.emissions_tco2, 1980.0);
        assert_eq!(balance.net_balance_tco2, -530.0);

        // no record for the reporting year falls back to the latest one
        response.reporting_period.year = 2030;
        assert_eq!(carbon_balance(&response).sequestration_tco2, 2015.0);
    }

    #[test]
    fn test_carbon_balance_without_yearly_data() {
        let response = SoilHealthCarbonResponse {
            company: Default::default(),
            reporting_period: ReportingPeriod::calendar(2024),
            monthly_data: Vec::new(),
            yearly_data: Vec::new(),
        };
        assert_eq!(carbon_balance(&response), CarbonBalance::default());
    }

    #[test]
    fn test_soil_metrics_are_idempotent() {
        let response = fixture();
        assert_eq!(carbon_balance(&response), carbon_balance(&response));
        assert_eq!(
            yearly_data_comparison(&response),
            yearly_data_comparison(&response)
        );
    }
}
