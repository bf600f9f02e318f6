//! Soil health and carbon tabs.

use super::{key_values, table, ModalType, Tab, TabContext};
use esg_api::SoilHealthCarbonResponse;
use esg_metrics::correlation::{
    computed_correlation_matrix, illustrative_correlation_matrix, CorrelationMatrix,
};
use esg_metrics::soil::{
    carbon_balance, detect_anomalies, soil_field_stats, yearly_data_comparison, SoilField,
};
use esg_utils::format::NOT_AVAILABLE;
use log::warn;
use std::fmt::Write;

/// Carbon balance headline figures.
pub struct SoilOverviewTab;

impl Tab<SoilHealthCarbonResponse> for SoilOverviewTab {
    fn title(&self) -> &'static str {
        "Overview"
    }

    fn render_data(&self, data: &SoilHealthCarbonResponse, ctx: &TabContext) -> String {
        let f = ctx.formatters;
        let balance = carbon_balance(data);
        key_values(&[
            ("Company", data.company.display_name().to_string()),
            ("Reporting period", data.reporting_period.label()),
            ("Monthly samples", data.monthly_data.len().to_string()),
            ("Mean SOC (tC/ha)", f.number(balance.mean_soc_tc_per_ha, 2)),
            ("Mean NDVI", f.number(balance.mean_ndvi, 3)),
            ("Delta SOC total (tCO2)", f.number(balance.total_delta_soc_co2_t, 1)),
            ("Biomass CO2 total (t/ha)", f.number(balance.total_biomass_co2_t_per_ha, 1)),
            ("Sequestration (tCO2)", f.number(balance.sequestration_tco2, 1)),
            ("Emissions (tCO2)", f.number(balance.emissions_tco2, 1)),
            ("Net balance (tCO2)", f.number(balance.net_balance_tco2, 1)),
            ("Emissions offset", f.percent(balance.offset_percentage)),
        ])
    }
}

/// Per-field statistics, anomaly flags and the correlation table.
///
/// Selecting a field key (e.g. `ndvi_max`) opens its statistics; selecting a
/// month label (e.g. `2024-08`) opens the anomaly view for that month.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsTab {
    pub computed_correlations: bool,
}

impl AnalyticsTab {
    fn correlation(&self, data: &SoilHealthCarbonResponse) -> CorrelationMatrix {
        if self.computed_correlations {
            match computed_correlation_matrix(&data.monthly_data) {
                Some(matrix) => return matrix,
                None => warn!(
                    "{} monthly samples are too few to correlate, showing illustrative values",
                    data.monthly_data.len()
                ),
            }
        }
        illustrative_correlation_matrix()
    }
}

impl Tab<SoilHealthCarbonResponse> for AnalyticsTab {
    fn title(&self) -> &'static str {
        "Analytics"
    }

    fn render_data(&self, data: &SoilHealthCarbonResponse, ctx: &TabContext) -> String {
        let f = ctx.formatters;
        let samples = &data.monthly_data;

        let stats_rows: Vec<Vec<String>> = soil_field_stats(samples)
            .into_iter()
            .map(|(field, s)| {
                vec![
                    field.to_string(),
                    f.number(s.mean, 2),
                    f.number(s.median, 2),
                    f.number(s.std_dev, 2),
                    f.number(s.min, 2),
                    f.number(s.max, 2),
                ]
            })
            .collect();
        let mut out = table(&["Field", "Mean", "Median", "Std dev", "Min", "Max"], &stats_rows);

        out.push_str("\nAnomalies (|z| > 2)\n");
        let mut flagged = 0;
        for field in SoilField::ALL {
            for flag in detect_anomalies(samples, field).iter().filter(|a| a.is_anomaly) {
                flagged += 1;
                let _ = writeln!(
                    out,
                    "  {}-{:02}  {}  {} (z = {})",
                    flag.year,
                    flag.month,
                    field,
                    f.number(flag.value, 2),
                    f.number(flag.z_score, 2)
                );
            }
        }
        if flagged == 0 {
            out.push_str("  none\n");
        }

        let matrix = self.correlation(data);
        let _ = writeln!(
            out,
            "\nCorrelation ({})",
            if matrix.computed {
                "computed from monthly samples"
            } else {
                "illustrative values"
            }
        );
        let mut headers = vec![""];
        let names: Vec<String> = matrix.fields.iter().map(|field| field.to_string()).collect();
        headers.extend(names.iter().map(String::as_str));
        let rows: Vec<Vec<String>> = matrix
            .fields
            .iter()
            .zip(&matrix.values)
            .map(|(field, values)| {
                let mut row = vec![field.to_string()];
                row.extend(values.iter().map(|v| {
                    v.map_or_else(|| NOT_AVAILABLE.to_string(), |v| f.number(v, 2))
                }));
                row
            })
            .collect();
        out.push_str(&table(&headers, &rows));
        out
    }

    fn select(&self, data: &SoilHealthCarbonResponse, key: &str, ctx: &TabContext) -> bool {
        if SoilField::from_key(key).is_some() {
            ctx.drill_down(key, ModalType::Statistics);
            return true;
        }
        if data.monthly_data.iter().any(|s| s.label() == key) {
            ctx.drill_down(key, ModalType::Anomaly);
            return true;
        }
        false
    }
}

/// Year-over-year sequestration, emissions and net balance.
pub struct YearlyComparisonTab;

impl Tab<SoilHealthCarbonResponse> for YearlyComparisonTab {
    fn title(&self) -> &'static str {
        "Yearly Comparison"
    }

    fn render_data(&self, data: &SoilHealthCarbonResponse, ctx: &TabContext) -> String {
        let f = ctx.formatters;
        let comparison = yearly_data_comparison(data);
        if comparison.is_empty() {
            return "No yearly data reported\n".to_string();
        }
        let rows: Vec<Vec<String>> = comparison
            .iter()
            .map(|c| {
                vec![
                    c.year.to_string(),
                    f.number(c.sequestration, 1),
                    f.number(c.emissions, 1),
                    f.number(c.net_balance, 1),
                    f.number(c.soc, 2),
                    f.number(c.ndvi, 3),
                ]
            })
            .collect();
        table(
            &["Year", "Sequestration", "Emissions", "Net balance", "SOC", "NDVI"],
            &rows,
        )
    }
}

/// All soil tabs in display order.
pub fn soil_tabs(computed_correlations: bool) -> Vec<Box<dyn Tab<SoilHealthCarbonResponse>>> {
    vec![
        Box::new(SoilOverviewTab),
        Box::new(AnalyticsTab {
            computed_correlations,
        }),
        Box::new(YearlyComparisonTab),
    ]
}
