//! Text views of the dashboard tabs.
//!
//! Each tab receives the (possibly absent) response, a set of formatter
//! callbacks and a drill-down callback it invokes with `(metric, modal)` when
//! the user asks for a detail view.

use esg_utils::format::{format_currency, format_number, format_percent};
use log::debug;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Padding, Style};
use tabled::{Table, Tabled};

pub mod detail;
pub mod energy;
pub mod soil;

/// Shown in place of a tab body when there is no response to render.
pub const NO_DATA: &str = "No data available";

/// Kind of detail view a drill-down opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalType {
    MetricDetail,
    Statistics,
    Anomaly,
}

type NumberFn = Box<dyn Fn(f64, usize) -> String + Send + Sync>;
type ValueFn = Box<dyn Fn(f64) -> String + Send + Sync>;

/// Number, percent and currency formatting callbacks shared by every tab.
pub struct Formatters {
    number: NumberFn,
    percent: ValueFn,
    currency: ValueFn,
}

impl Formatters {
    pub fn new(
        number: impl Fn(f64, usize) -> String + Send + Sync + 'static,
        percent: impl Fn(f64) -> String + Send + Sync + 'static,
        currency: impl Fn(f64) -> String + Send + Sync + 'static,
    ) -> Self {
        Formatters {
            number: Box::new(number),
            percent: Box::new(percent),
            currency: Box::new(currency),
        }
    }

    pub fn number(&self, value: f64, decimals: usize) -> String {
        (self.number)(value, decimals)
    }

    pub fn percent(&self, value: f64) -> String {
        (self.percent)(value)
    }

    pub fn currency(&self, value: f64) -> String {
        (self.currency)(value)
    }

    /// `number`, or "N/A" for a missing value.
    pub fn optional_number(&self, value: Option<f64>, decimals: usize) -> String {
        value.map_or_else(|| esg_utils::format::NOT_AVAILABLE.to_string(), |v| self.number(v, decimals))
    }
}

impl Default for Formatters {
    fn default() -> Self {
        Formatters::new(format_number, format_percent, |v| format_currency(v, "$"))
    }
}

pub struct TabContext<'a> {
    pub formatters: &'a Formatters,
    on_drill_down: &'a dyn Fn(&str, ModalType),
}

impl<'a> TabContext<'a> {
    pub fn new(formatters: &'a Formatters, on_drill_down: &'a dyn Fn(&str, ModalType)) -> Self {
        TabContext {
            formatters,
            on_drill_down,
        }
    }

    pub fn drill_down(&self, metric: &str, modal: ModalType) {
        debug!("drill down into {} ({:?})", metric, modal);
        (self.on_drill_down)(metric, modal)
    }
}

pub trait Tab<R> {
    fn title(&self) -> &'static str;

    /// Tab body for a loaded response.
    fn render_data(&self, data: &R, ctx: &TabContext) -> String;

    /// Full tab view; a missing response renders [`NO_DATA`].
    fn render(&self, data: Option<&R>, ctx: &TabContext) -> String {
        let body = match data {
            Some(data) => self.render_data(data, ctx),
            None => format!("{}\n", NO_DATA),
        };
        format!("{}{}", heading(self.title()), body)
    }

    /// Drill into `key`. Returns false when this tab has no detail view for it.
    fn select(&self, _data: &R, _key: &str, _ctx: &TabContext) -> bool {
        false
    }
}

pub(crate) fn heading(title: &str) -> String {
    format!("== {} ==\n", title)
}

/// `label: value` lines with the values aligned.
pub(crate) fn key_values(rows: &[(&str, String)]) -> String {
    let mut builder = Builder::default();
    for (key, value) in rows {
        builder.push_record([format!("{}:", key), value.clone()]);
    }
    let mut table = builder.build();
    table
        .with(Style::empty())
        .modify(Columns::first(), Padding::new(0, 2, 0, 0))
        .modify(Columns::new(1..), Padding::zero());
    finish(table)
}

/// Table with a header row; the first column is left-aligned, the rest right-aligned.
pub(crate) fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut builder = Builder::default();
    builder.push_record(headers.iter().copied());
    for row in rows {
        builder.push_record(row.iter().map(String::as_str));
    }
    styled(builder.build())
}

/// Table of derived rows, styled like [`table`].
pub(crate) fn record_table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    styled(Table::new(rows))
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::psql())
        .modify(Columns::new(1..), Alignment::right());
    finish(table)
}

fn finish(table: Table) -> String {
    let mut out = String::new();
    for line in table.to_string().lines() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Runs `f` with a context whose drill-downs are recorded.
    pub(crate) fn with_recording_context<T>(
        f: impl FnOnce(&TabContext) -> T,
    ) -> (T, Vec<(String, ModalType)>) {
        let calls = RefCell::new(Vec::new());
        let record = |metric: &str, modal: ModalType| calls.borrow_mut().push((metric.to_string(), modal));
        let formatters = Formatters::default();
        let ctx = TabContext::new(&formatters, &record);
        let result = f(&ctx);
        (result, calls.into_inner())
    }

    struct Empty;

    impl Tab<u32> for Empty {
        fn title(&self) -> &'static str {
            "Empty"
        }

        fn render_data(&self, data: &u32, _ctx: &TabContext) -> String {
            format!("{}\n", data)
        }
    }

    #[test]
    fn test_missing_response_renders_no_data() {
        let (out, calls) = with_recording_context(|ctx| Empty.render(None, ctx));
        assert_eq!(out, "== Empty ==\nNo data available\n");
        assert!(calls.is_empty());
    }

    #[test]
    fn test_default_select_does_nothing() {
        let (handled, calls) = with_recording_context(|ctx| Empty.select(&1, "anything", ctx));
        assert!(!handled);
        assert!(calls.is_empty());
    }

    #[test]
    fn test_default_formatters() {
        let f = Formatters::default();
        assert_eq!(f.number(1234.5, 1), "1,234.5");
        assert_eq!(f.percent(50.0), "50.0%");
        assert_eq!(f.currency(1234.5), "$1,234.50");
        assert_eq!(f.optional_number(None, 2), "N/A");
    }

    #[test]
    fn test_custom_formatters_are_used() {
        let f = Formatters::new(|v, _| format!("<{}>", v), |v| format!("{}pct", v), |v| format!("EUR {}", v));
        assert_eq!(f.number(2.0, 3), "<2>");
        assert_eq!(f.percent(7.0), "7pct");
        assert_eq!(f.currency(3.0), "EUR 3");
    }

    #[test]
    fn test_table_alignment() {
        let out = table(
            &["Year", "Value"],
            &[
                vec!["2023".to_string(), "5".to_string()],
                vec!["2024".to_string(), "1,250".to_string()],
            ],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], " Year | Value");
        assert_eq!(lines[1], "------+-------");
        assert_eq!(lines[2], " 2023 |     5");
        assert_eq!(lines[3], " 2024 | 1,250");
    }

    #[test]
    fn test_record_table_uses_renamed_headers() {
        #[derive(Tabled)]
        struct Row {
            #[tabled(rename = "Field")]
            field: &'static str,
            #[tabled(rename = "z")]
            z: f64,
        }
        let out = record_table([Row { field: "NDVI", z: 2.5 }]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], " Field |   z");
        assert_eq!(lines[2], " NDVI  | 2.5");
    }

    #[test]
    fn test_key_values_alignment() {
        let out = key_values(&[("Name", "KSE".to_string()), ("Country", "TZ".to_string())]);
        assert_eq!(out, "Name:     KSE\nCountry:  TZ\n");
    }
}
