//! Derived metrics for ESG energy and soil-carbon reporting.
//!
//! Everything here is a pure function of an already-fetched response:
//! ratios, category breakdowns and descriptive statistics, recomputed on
//! every call. Missing inputs and zero denominators produce zeros rather
//! than errors, so a sparse response renders as "0%" instead of failing.

pub mod correlation;
pub mod energy;
pub mod soil;
pub mod statistics;

/// `part / total * 100`, or 0 when the total is not positive.
pub fn percentage(part: f64, total: f64) -> f64 {
    if total > 0.0 && total.is_finite() {
        part / total * 100.0
    } else {
        0.0
    }
}
