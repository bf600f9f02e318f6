//! Energy-domain derived metrics: renewable/fossil mix and grid operations.

use crate::percentage;
use esg_api::energy::{
    DerivedEnergyMix, DerivedGridOperations, EnergyConsumptionResponse, EnergyKpis, EnergyTrends,
    FossilBreakdown, RenewableBreakdown,
};
use esg_api::CompanyProfile;
use esg_utils::format::round_to;
use log::debug;

/// Names of the raw environmental metrics the mix and grid figures are built from.
pub mod metric_names {
    pub const BAGASSE: &str = "Bagasse Usage";
    pub const SOLAR: &str = "Solar Energy Generation";
    pub const COAL: &str = "Coal Consumption";
    pub const DIESEL_INSIDE: &str = "Diesel Consumption (Inside Company)";
    pub const DIESEL_OUTSIDE: &str = "Diesel Consumption (Outside Company)";
    pub const PETROL_INSIDE: &str = "Petrol Consumption (Inside Company)";
    pub const PETROL_OUTSIDE: &str = "Petrol Consumption (Outside Company)";
    pub const ELECTRICITY_GENERATED: &str = "Electricity Generated";
    pub const ELECTRICITY_PURCHASED: &str = "Electricity Purchased from Grid";
    pub const ELECTRICITY_EXPORTED: &str = "Electricity Exported to Grid";
}

use metric_names::*;

/// Value of a named metric for the response's reporting year.
///
/// Falls back to the most recent year the series reports, then to 0 when
/// the metric is absent or is a list series.
pub fn metric_value(response: &EnergyConsumptionResponse, name: &str) -> f64 {
    let Some(series) = response.metric(name) else {
        return 0.0;
    };
    let year = response.reporting_period.year;
    match series.for_year(year).or_else(|| series.latest()) {
        Some(entry) => {
            if entry.year != year {
                debug!("{} has no {} entry, using {}", name, year, entry.year);
            }
            entry.numeric()
        }
        None => 0.0,
    }
}

/// Renewable/fossil mix: the server-computed `energy_mix` when present,
/// otherwise derived from the raw environmental metrics.
pub fn energy_mix_data(response: &EnergyConsumptionResponse) -> DerivedEnergyMix {
    match &response.energy_mix {
        Some(mix) => mix.clone(),
        None => compute_energy_mix(response),
    }
}

/// Client-side energy mix from the raw environmental metrics.
///
/// Named breakdown buckets are rounded to one decimal and `other` is
/// `100 - sum(named)`, which can come out slightly negative from rounding.
/// That residue is kept rather than clamped.
pub fn compute_energy_mix(response: &EnergyConsumptionResponse) -> DerivedEnergyMix {
    let value = |name| metric_value(response, name);

    let bagasse = value(BAGASSE);
    let solar = value(SOLAR);
    let coal = value(COAL);
    let diesel = value(DIESEL_INSIDE) + value(DIESEL_OUTSIDE);
    let petrol = value(PETROL_INSIDE) + value(PETROL_OUTSIDE);

    let total_renewable = bagasse + solar;
    let total_fossil = coal + diesel + petrol;
    let total = total_renewable + total_fossil;

    let renewable_breakdown = if total_renewable > 0.0 {
        let bagasse = round_to(percentage(bagasse, total_renewable), 1);
        let solar = round_to(percentage(solar, total_renewable), 1);
        RenewableBreakdown {
            bagasse,
            solar,
            other: round_to(100.0 - bagasse - solar, 1),
        }
    } else {
        RenewableBreakdown::default()
    };

    let fossil_breakdown = if total_fossil > 0.0 {
        let coal = round_to(percentage(coal, total_fossil), 1);
        let diesel = round_to(percentage(diesel, total_fossil), 1);
        let petrol = round_to(percentage(petrol, total_fossil), 1);
        FossilBreakdown {
            coal,
            diesel,
            petrol,
            other: round_to(100.0 - coal - diesel - petrol, 1),
        }
    } else {
        FossilBreakdown::default()
    };

    DerivedEnergyMix {
        total_renewable,
        total_fossil,
        renewable_percentage: percentage(total_renewable, total),
        fossil_percentage: percentage(total_fossil, total),
        renewable_breakdown,
        fossil_breakdown,
    }
}

/// Grid self-sufficiency and dependency: the server-computed
/// `grid_operations` when present, otherwise derived from the electricity metrics.
pub fn grid_operations_data(response: &EnergyConsumptionResponse) -> DerivedGridOperations {
    match &response.grid_operations {
        Some(grid) => grid.clone(),
        None => compute_grid_operations(
            metric_value(response, ELECTRICITY_GENERATED),
            metric_value(response, ELECTRICITY_PURCHASED),
            metric_value(response, ELECTRICITY_EXPORTED),
        ),
    }
}

pub fn compute_grid_operations(generated: f64, purchased: f64, exported: f64) -> DerivedGridOperations {
    let demand = generated + purchased;
    DerivedGridOperations {
        generated,
        purchased,
        exported,
        self_sufficiency: percentage(generated, demand),
        grid_dependency: percentage(purchased, demand),
        net_import: purchased - exported,
    }
}

pub fn energy_kpis(response: &EnergyConsumptionResponse) -> &EnergyKpis {
    &response.kpis
}

pub fn energy_trends(response: &EnergyConsumptionResponse) -> &EnergyTrends {
    &response.trends
}

pub fn energy_company_info(response: &EnergyConsumptionResponse) -> &CompanyProfile {
    &response.company
}

#[cfg(test)]
mod tests {
    use super::*;
    use esg_api::energy::{EnergyMetricSeries, MetricData, YearlyValue};
    use esg_api::{parse_energy_response, ReportingPeriod, ENERGY_FIXTURE};
    use std::collections::BTreeMap;

    fn series(name: &str, year: i32, value: f64) -> EnergyMetricSeries {
        EnergyMetricSeries {
            name: name.to_string(),
            unit: Some("GJ".to_string()),
            description: None,
            data: MetricData::Yearly(vec![YearlyValue {
                year,
                value: value.to_string(),
                numeric_value: Some(value),
                unit: "GJ".to_string(),
            }]),
        }
    }

    fn response_with(values: &[(&str, f64)]) -> EnergyConsumptionResponse {
        let environmental: BTreeMap<String, EnergyMetricSeries> = values
            .iter()
            .map(|(name, v)| (name.to_string(), series(name, 2024, *v)))
            .collect();
        EnergyConsumptionResponse {
            company: CompanyProfile::default(),
            reporting_period: ReportingPeriod::calendar(2024),
            environmental,
            energy_mix: None,
            grid_operations: None,
            kpis: EnergyKpis::default(),
            trends: EnergyTrends::default(),
        }
    }

    #[test]
    fn test_fixture_energy_mix_is_even_split() {
        let response = parse_energy_response(ENERGY_FIXTURE).unwrap();
        let mix = energy_mix_data(&response);
        assert_eq!(mix.total_renewable, 1000.0);
        assert_eq!(mix.total_fossil, 1000.0);
        assert_eq!(mix.renewable_percentage, 50.0);
        assert_eq!(mix.fossil_percentage, 50.0);
        assert_eq!(mix.renewable_breakdown.bagasse, 60.0);
        assert_eq!(mix.renewable_breakdown.solar, 40.0);
        assert_eq!(mix.fossil_breakdown.coal, 50.0);
        assert_eq!(mix.fossil_breakdown.diesel, 50.0);
        assert_eq!(mix.fossil_breakdown.petrol, 0.0);
        assert_eq!(mix.fossil_breakdown.other, 0.0);
    }

    #[test]
    fn test_renewable_and_fossil_sum_to_hundred() {
        for (renewable, fossil) in [(1.0, 2.0), (333.3, 12.9), (0.5, 999.5), (7.0, 7.0)] {
            let response = response_with(&[(SOLAR, renewable), (COAL, fossil)]);
            let mix = compute_energy_mix(&response);
            let sum = round_to(mix.renewable_percentage, 1) + round_to(mix.fossil_percentage, 1);
            assert!((sum - 100.0).abs() <= 0.1 + 1e-9, "sum was {sum}");
        }
    }

    #[test]
    fn test_other_bucket_absorbs_rounding_residue() {
        // thirds round down to 33.3 each, leaving 0.1
        let response = response_with(&[(COAL, 1.0), (DIESEL_INSIDE, 1.0), (PETROL_INSIDE, 1.0)]);
        let mix = compute_energy_mix(&response);
        assert_eq!(mix.fossil_breakdown.coal, 33.3);
        assert_eq!(mix.fossil_breakdown.other, 0.1);

        // 33.36 + 33.36 + 33.28 rounds to 33.4 + 33.4 + 33.3 = 100.1
        let response = response_with(&[(COAL, 33.36), (DIESEL_INSIDE, 33.36), (PETROL_INSIDE, 33.28)]);
        let mix = compute_energy_mix(&response);
        assert_eq!(mix.fossil_breakdown.coal, 33.4);
        assert_eq!(mix.fossil_breakdown.petrol, 33.3);
        assert_eq!(mix.fossil_breakdown.other, -0.1);
    }

    #[test]
    fn test_empty_response_mix_is_zero() {
        let response = response_with(&[]);
        let mix = compute_energy_mix(&response);
        assert_eq!(mix, DerivedEnergyMix::default());
    }

    #[test]
    fn test_server_mix_passes_through() {
        let mut response = response_with(&[(SOLAR, 10.0)]);
        let server_mix = DerivedEnergyMix {
            renewable_percentage: 12.5,
            fossil_percentage: 87.5,
            ..Default::default()
        };
        response.energy_mix = Some(server_mix.clone());
        assert_eq!(energy_mix_data(&response), server_mix);
    }

    #[test]
    fn test_metric_value_falls_back_to_latest_year() {
        let mut response = response_with(&[]);
        response
            .environmental
            .insert(COAL.to_string(), series(COAL, 2022, 75.0));
        assert_eq!(metric_value(&response, COAL), 75.0);
        assert_eq!(metric_value(&response, SOLAR), 0.0);
    }

    #[test]
    fn test_list_series_reads_as_zero() {
        let response = parse_energy_response(ENERGY_FIXTURE).unwrap();
        assert_eq!(metric_value(&response, "Energy Efficiency Initiatives"), 0.0);
    }

    #[test]
    fn test_grid_operations_from_fixture() {
        let response = parse_energy_response(ENERGY_FIXTURE).unwrap();
        let grid = grid_operations_data(&response);
        assert_eq!(grid.self_sufficiency, 75.0);
        assert_eq!(grid.grid_dependency, 25.0);
        assert_eq!(grid.net_import, 1500.0);
    }

    #[test]
    fn test_grid_operations_zero_guard() {
        let grid = compute_grid_operations(0.0, 0.0, 0.0);
        assert_eq!(grid.self_sufficiency, 0.0);
        assert_eq!(grid.grid_dependency, 0.0);
        assert_eq!(grid.net_import, 0.0);

        let exporting = compute_grid_operations(0.0, 0.0, 120.0);
        assert_eq!(exporting.net_import, -120.0);
    }

    #[test]
    fn test_projections_return_sub_objects() {
        let response = parse_energy_response(ENERGY_FIXTURE).unwrap();
        assert_eq!(energy_kpis(&response).renewable_share_percent, Some(50.0));
        assert_eq!(energy_trends(&response).yearly.len(), 2);
        assert_eq!(energy_company_info(&response).country, "Tanzania");
    }

    #[test]
    fn test_derivations_are_idempotent() {
        let response = parse_energy_response(ENERGY_FIXTURE).unwrap();
        assert_eq!(energy_mix_data(&response), energy_mix_data(&response));
        assert_eq!(grid_operations_data(&response), grid_operations_data(&response));
        assert_eq!(energy_kpis(&response), energy_kpis(&response));
    }
}
