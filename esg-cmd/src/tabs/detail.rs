//! Detail views opened by a drill-down.

use super::{heading, key_values, record_table, Formatters, ModalType};
use esg_api::energy::{EnergyMetricSeries, MetricData};
use esg_api::{EnergyConsumptionResponse, MonthlySoilSample, SoilHealthCarbonResponse};
use esg_metrics::soil::{detect_anomalies, field_stats, AnomalyFlag, SoilField};
use tabled::Tabled;

#[derive(Tabled)]
struct YearlyRow {
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Reported")]
    reported: String,
}

#[derive(Tabled)]
struct ListRow<'a> {
    #[tabled(rename = "Item")]
    label: &'a str,
    #[tabled(rename = "Value")]
    value: &'a str,
    #[tabled(rename = "Unit")]
    unit: &'a str,
}

#[derive(Tabled)]
struct ZScoreCells {
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "z")]
    z_score: String,
    #[tabled(rename = "Anomaly")]
    flagged: &'static str,
}

impl ZScoreCells {
    fn new(flag: &AnomalyFlag, f: &Formatters) -> Self {
        ZScoreCells {
            value: f.number(flag.value, 3),
            z_score: f.number(flag.z_score, 2),
            flagged: if flag.is_anomaly { "yes" } else { "" },
        }
    }
}

#[derive(Tabled)]
struct MonthZRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(inline)]
    cells: ZScoreCells,
}

#[derive(Tabled)]
struct FieldZRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(inline)]
    cells: ZScoreCells,
}

/// Detail view for an energy drill-down, `None` when `metric` is unknown.
pub fn render_energy_detail(
    data: &EnergyConsumptionResponse,
    metric: &str,
    modal: ModalType,
    f: &Formatters,
) -> Option<String> {
    match modal {
        ModalType::MetricDetail => data.metric(metric).map(|s| metric_detail(metric, s, f)),
        ModalType::Statistics | ModalType::Anomaly => None,
    }
}

/// Detail view for a soil drill-down, `None` when `key` names nothing.
pub fn render_soil_detail(
    data: &SoilHealthCarbonResponse,
    key: &str,
    modal: ModalType,
    f: &Formatters,
) -> Option<String> {
    match modal {
        ModalType::Statistics => {
            SoilField::from_key(key).map(|field| statistics_detail(&data.monthly_data, field, f))
        }
        ModalType::Anomaly => anomaly_detail(&data.monthly_data, key, f),
        ModalType::MetricDetail => None,
    }
}

pub fn metric_detail(name: &str, series: &EnergyMetricSeries, f: &Formatters) -> String {
    let mut out = heading(name);
    if let Some(description) = &series.description {
        out.push_str(description);
        out.push('\n');
    }
    if let Some(unit) = &series.unit {
        out.push_str(&key_values(&[("Unit", unit.clone())]));
    }
    out.push('\n');
    match &series.data {
        MetricData::Yearly(values) => {
            out.push_str(&record_table(values.iter().map(|v| YearlyRow {
                year: v.year,
                value: f.number(v.numeric(), 2),
                reported: v.value.clone(),
            })));
        }
        MetricData::List(items) => {
            out.push_str(&record_table(items.iter().map(|i| ListRow {
                label: &i.label,
                value: &i.value,
                unit: &i.unit,
            })));
        }
    }
    out
}

pub fn statistics_detail(samples: &[MonthlySoilSample], field: SoilField, f: &Formatters) -> String {
    let stats = field_stats(samples, field);
    let mut out = heading(&format!("{} statistics", field));
    out.push_str(&key_values(&[
        ("Unit", field.unit().to_string()),
        ("Samples", samples.len().to_string()),
        ("Mean", f.number(stats.mean, 3)),
        ("Median", f.number(stats.median, 3)),
        ("Std dev", f.number(stats.std_dev, 3)),
        ("Min", f.number(stats.min, 3)),
        ("Max", f.number(stats.max, 3)),
    ]));
    out.push('\n');
    out.push_str(&record_table(
        detect_anomalies(samples, field)
            .iter()
            .map(|a| MonthZRow {
                month: format!("{}-{:02}", a.year, a.month),
                cells: ZScoreCells::new(a, f),
            }),
    ));
    out
}

/// Every field's z-score for the month labelled `label` (e.g. "2024-08").
pub fn anomaly_detail(samples: &[MonthlySoilSample], label: &str, f: &Formatters) -> Option<String> {
    let idx = samples.iter().position(|s| s.label() == label)?;
    let mut out = heading(&format!("Anomalies for {}", label));
    out.push_str(&record_table(SoilField::ALL.iter().map(|field| FieldZRow {
        field: field.to_string(),
        cells: ZScoreCells::new(&detect_anomalies(samples, *field)[idx], f),
    })));
    Some(out)
}
