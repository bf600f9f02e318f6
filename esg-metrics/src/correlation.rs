//! Correlation tables for the soil analytics view.
//!
//! The default table is a fixed, illustrative set of coefficients and is not
//! derived from the sample data. [`computed_correlation_matrix`] is the
//! opt-in Pearson computation over the monthly samples.

use crate::soil::{field_values, SoilField};
use esg_api::soil::MonthlySoilSample;
use serde::Serialize;

/// Fields, in row/column order, covered by the correlation tables.
pub const CORRELATION_FIELDS: [SoilField; 4] = [
    SoilField::SocTcPerHa,
    SoilField::NdviMax,
    SoilField::BiomassCo2TPerHa,
    SoilField::DeltaSocCo2T,
];

/// Illustrative coefficients, indexed like [`CORRELATION_FIELDS`].
pub const ILLUSTRATIVE_CORRELATIONS: [[f64; 4]; 4] = [
    [1.00, 0.78, 0.65, 0.82],
    [0.78, 1.00, 0.91, 0.54],
    [0.65, 0.91, 1.00, 0.47],
    [0.82, 0.54, 0.47, 1.00],
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub fields: Vec<SoilField>,
    /// `None` where a coefficient is undefined (a field without variance)
    pub values: Vec<Vec<Option<f64>>>,
    /// false for the illustrative table
    pub computed: bool,
}

impl CorrelationMatrix {
    pub fn get(&self, a: SoilField, b: SoilField) -> Option<f64> {
        let row = self.fields.iter().position(|f| *f == a)?;
        let col = self.fields.iter().position(|f| *f == b)?;
        self.values[row][col]
    }
}

/// The fixed illustrative table shown by default.
pub fn illustrative_correlation_matrix() -> CorrelationMatrix {
    CorrelationMatrix {
        fields: CORRELATION_FIELDS.to_vec(),
        values: ILLUSTRATIVE_CORRELATIONS
            .iter()
            .map(|row| row.iter().map(|v| Some(*v)).collect())
            .collect(),
        computed: false,
    }
}

/// Pearson correlation coefficient of two equally long samples.
///
/// `None` for mismatched lengths, fewer than two points, or when either
/// side has zero variance.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Pearson coefficients between every pair of [`CORRELATION_FIELDS`],
/// `None` when there are fewer than two samples.
pub fn computed_correlation_matrix(samples: &[MonthlySoilSample]) -> Option<CorrelationMatrix> {
    if samples.len() < 2 {
        return None;
    }
    let columns: Vec<Vec<f64>> = CORRELATION_FIELDS
        .iter()
        .map(|field| field_values(samples, *field))
        .collect();
    let values = columns
        .iter()
        .map(|a| columns.iter().map(|b| pearson_correlation(a, b)).collect())
        .collect();
    Some(CorrelationMatrix {
        fields: CORRELATION_FIELDS.to_vec(),
        values,
        computed: true,
    })
}
