use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The year (and optional date range / fiscal year label) that scopes a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawReportingPeriod")]
pub struct ReportingPeriod {
    pub year: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub fiscal_year: Option<String>,
}

#[derive(Deserialize)]
struct RawReportingPeriod {
    #[serde(deserialize_with = "crate::de::int_or_string")]
    year: i32,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    fiscal_year: Option<String>,
}

impl TryFrom<RawReportingPeriod> for ReportingPeriod {
    type Error = String;

    fn try_from(raw: RawReportingPeriod) -> Result<Self, Self::Error> {
        if let (Some(start), Some(end)) = (raw.start_date, raw.end_date) {
            if start > end {
                return Err(format!(
                    "reporting period {} starts after it ends ({start} > {end})",
                    raw.year
                ));
            }
        }
        Ok(ReportingPeriod {
            year: raw.year,
            start_date: raw.start_date,
            end_date: raw.end_date,
            fiscal_year: raw.fiscal_year,
        })
    }
}

impl ReportingPeriod {
    /// A plain calendar-year period.
    pub fn calendar(year: i32) -> Self {
        ReportingPeriod {
            year,
            start_date: None,
            end_date: None,
            fiscal_year: None,
        }
    }

    /// Whether `date` falls in this period: the explicit range when one is
    /// given, the calendar year otherwise. Open-ended ranges are unbounded on
    /// the missing side.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.start_date, self.end_date) {
            (None, None) => date.year() == self.year,
            (start, end) => {
                start.map_or(true, |s| s <= date) && end.map_or(true, |e| date <= e)
            }
        }
    }

    /// Label shown in headers, e.g. "FY2024 (2023-07-01 to 2024-06-30)".
    pub fn label(&self) -> String {
        let name = self
            .fiscal_year
            .clone()
            .unwrap_or_else(|| self.year.to_string());
        match (self.start_date, self.end_date) {
            (Some(s), Some(e)) => format!("{name} ({s} to {e})"),
            _ => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ReportingPeriod;
    use chrono::NaiveDate;

    #[test]
    fn test_calendar_contains() {
        let period = ReportingPeriod::calendar(2024);
        assert!(period.contains(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        assert_eq!(period.label(), "2024");
    }

    #[test]
    fn test_fiscal_range() {
        let period: ReportingPeriod = serde_json::from_str(
            r#"{"year": "2024", "start_date": "2023-07-01", "end_date": "2024-06-30", "fiscal_year": "FY2024"}"#,
        )
        .unwrap();
        assert!(period.contains(NaiveDate::from_ymd_opt(2023, 9, 1).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()));
        assert_eq!(period.label(), "FY2024 (2023-07-01 to 2024-06-30)");
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = serde_json::from_str::<ReportingPeriod>(
            r#"{"year": 2024, "start_date": "2024-06-30", "end_date": "2023-07-01"}"#,
        );
        assert!(result.is_err());
    }
}
