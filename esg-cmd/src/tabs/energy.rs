//! Energy consumption and renewables tabs.

use super::{key_values, table, ModalType, Tab, TabContext};
use esg_api::energy::{DataType, MetricData};
use esg_api::EnergyConsumptionResponse;
use esg_metrics::energy::{
    energy_company_info, energy_kpis, energy_mix_data, energy_trends, grid_operations_data,
    metric_value,
};
use esg_utils::format::NOT_AVAILABLE;

/// Company profile and headline KPIs.
pub struct OverviewTab;

impl Tab<EnergyConsumptionResponse> for OverviewTab {
    fn title(&self) -> &'static str {
        "Overview"
    }

    fn render_data(&self, data: &EnergyConsumptionResponse, ctx: &TabContext) -> String {
        let f = ctx.formatters;
        let company = energy_company_info(data);
        let kpis = energy_kpis(data);

        let frameworks = if company.reporting_frameworks.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            company.reporting_frameworks.join(", ")
        };
        let mut rows = vec![
            ("Company", company.display_name().to_string()),
            ("Industry", company.industry.clone()),
            ("Country", company.country.clone()),
            ("Reporting period", data.reporting_period.label()),
            ("Frameworks", frameworks),
        ];
        if let Some(area) = &company.area_of_interest {
            let size = area
                .area_hectares
                .map(|ha| format!(" ({} ha)", f.number(ha, 1)))
                .unwrap_or_default();
            rows.push(("Area of interest", format!("{}{}", area.name, size)));
        }
        rows.extend([
            ("Total energy (GJ)", f.optional_number(kpis.total_energy_gj, 0)),
            (
                "Renewable share",
                kpis.renewable_share_percent
                    .map_or_else(|| NOT_AVAILABLE.to_string(), |v| f.percent(v)),
            ),
            (
                "Energy intensity (GJ/t)",
                f.optional_number(kpis.energy_intensity_gj_per_tonne, 2),
            ),
            ("Emissions (tCO2e)", f.optional_number(kpis.emissions_tco2e, 1)),
            (
                "Energy cost",
                kpis.energy_cost
                    .map_or_else(|| NOT_AVAILABLE.to_string(), |v| f.currency(v)),
            ),
        ]);
        key_values(&rows)
    }
}

/// Renewable versus fossil shares with per-source breakdowns.
pub struct EnergyMixTab;

impl Tab<EnergyConsumptionResponse> for EnergyMixTab {
    fn title(&self) -> &'static str {
        "Energy Mix"
    }

    fn render_data(&self, data: &EnergyConsumptionResponse, ctx: &TabContext) -> String {
        let f = ctx.formatters;
        let mix = energy_mix_data(data);
        let renewable = &mix.renewable_breakdown;
        let fossil = &mix.fossil_breakdown;

        let mut out = key_values(&[
            ("Renewable", format!("{} ({})", f.number(mix.total_renewable, 1), f.percent(mix.renewable_percentage))),
            ("Fossil", format!("{} ({})", f.number(mix.total_fossil, 1), f.percent(mix.fossil_percentage))),
        ]);
        out.push('\n');
        out.push_str(&table(
            &["Renewable source", "Share"],
            &[
                vec!["Bagasse".to_string(), f.percent(renewable.bagasse)],
                vec!["Solar".to_string(), f.percent(renewable.solar)],
                vec!["Other".to_string(), f.percent(renewable.other)],
            ],
        ));
        out.push('\n');
        out.push_str(&table(
            &["Fossil source", "Share"],
            &[
                vec!["Coal".to_string(), f.percent(fossil.coal)],
                vec!["Diesel".to_string(), f.percent(fossil.diesel)],
                vec!["Petrol".to_string(), f.percent(fossil.petrol)],
                vec!["Other".to_string(), f.percent(fossil.other)],
            ],
        ));
        out
    }
}

/// Electricity generated on site versus exchanged with the grid.
pub struct GridTab;

impl Tab<EnergyConsumptionResponse> for GridTab {
    fn title(&self) -> &'static str {
        "Grid Operations"
    }

    fn render_data(&self, data: &EnergyConsumptionResponse, ctx: &TabContext) -> String {
        let f = ctx.formatters;
        let grid = grid_operations_data(data);
        key_values(&[
            ("Generated", f.number(grid.generated, 1)),
            ("Purchased", f.number(grid.purchased, 1)),
            ("Exported", f.number(grid.exported, 1)),
            ("Self-sufficiency", f.percent(grid.self_sufficiency)),
            ("Grid dependency", f.percent(grid.grid_dependency)),
            ("Net import", f.number(grid.net_import, 1)),
        ])
    }
}

pub struct TrendsTab;

impl Tab<EnergyConsumptionResponse> for TrendsTab {
    fn title(&self) -> &'static str {
        "Trends"
    }

    fn render_data(&self, data: &EnergyConsumptionResponse, ctx: &TabContext) -> String {
        let f = ctx.formatters;
        let trends = energy_trends(data);
        if trends.yearly.is_empty() {
            return "No trend data reported\n".to_string();
        }
        let rows: Vec<Vec<String>> = trends
            .yearly
            .iter()
            .map(|p| {
                vec![
                    p.year.to_string(),
                    f.number(p.total_energy_gj, 0),
                    f.number(p.renewable_gj, 0),
                    f.number(p.fossil_gj, 0),
                ]
            })
            .collect();
        let mut out = table(&["Year", "Total (GJ)", "Renewable (GJ)", "Fossil (GJ)"], &rows);
        if let Some(summary) = &trends.summary {
            out.push('\n');
            out.push_str(summary);
            out.push('\n');
        }
        out
    }
}

/// Every raw environmental metric with its reporting-year value.
/// Selecting a metric by name opens its detail view.
pub struct MetricsTab;

impl Tab<EnergyConsumptionResponse> for MetricsTab {
    fn title(&self) -> &'static str {
        "Metrics"
    }

    fn render_data(&self, data: &EnergyConsumptionResponse, ctx: &TabContext) -> String {
        let f = ctx.formatters;
        if data.environmental.is_empty() {
            return "No environmental metrics reported\n".to_string();
        }
        let rows: Vec<Vec<String>> = data
            .environmental
            .iter()
            .map(|(name, series)| {
                let value = match &series.data {
                    MetricData::Yearly(_) => f.number(metric_value(data, name), 1),
                    MetricData::List(items) => format!("{} items", items.len()),
                };
                let kind = match series.data_type() {
                    DataType::YearlySeries => "yearly",
                    DataType::List => "list",
                };
                vec![
                    name.clone(),
                    value,
                    series.unit.clone().unwrap_or_default(),
                    kind.to_string(),
                ]
            })
            .collect();
        table(&["Metric", "Value", "Unit", "Type"], &rows)
    }

    fn select(&self, data: &EnergyConsumptionResponse, key: &str, ctx: &TabContext) -> bool {
        if data.metric(key).is_none() {
            return false;
        }
        ctx.drill_down(key, ModalType::MetricDetail);
        true
    }
}

/// All energy tabs in display order.
pub fn energy_tabs() -> Vec<Box<dyn Tab<EnergyConsumptionResponse>>> {
    vec![
        Box::new(OverviewTab),
        Box::new(EnergyMixTab),
        Box::new(GridTab),
        Box::new(TrendsTab),
        Box::new(MetricsTab),
    ]
}
