use super::{stats, AnalysisError};
use crate::data::{DatasetLabel, MeasurementTable};
use std::fmt;

/// Correlation of error % against retention time, one value per tRCD.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationSeries {
    points: Vec<(f64, f64)>,
}

/// Does the retention/error relationship itself trend with tRCD?
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorrelationSummary {
    pub coefficient: f64,
    pub p_value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimingCorrelation {
    pub label: DatasetLabel,
    pub series: CorrelationSeries,
    pub summary: CorrelationSummary,
}

impl CorrelationSeries {
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn trcd_values(&self) -> Vec<f64> {
        self.points.iter().map(|(t, _)| *t).collect()
    }

    pub fn coefficients(&self) -> Vec<f64> {
        self.points.iter().map(|(_, c)| *c).collect()
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.points.len()
    }
}

pub fn correlation_by_timing(table: &MeasurementTable) -> Result<TimingCorrelation, AnalysisError> {
    let trcd_values = table.distinct_trcd();
    if trcd_values.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            found: trcd_values.len(),
        });
    }

    let points: Vec<(f64, f64)> = trcd_values
        .iter()
        .map(|&trcd| {
            let (errors, retention): (Vec<f64>, Vec<f64>) = table
                .rows_with_trcd(trcd)
                .map(|r| (r.error_percent, r.retention_secs))
                .unzip();
            // undefined correlations (constant subset) count as no correlation
            let corr = stats::pearson(&errors, &retention).unwrap_or(0.0);
            tracing::trace!(trcd, corr, rows = errors.len(), "bucket correlation");
            (trcd, corr)
        })
        .collect();
    let series = CorrelationSeries { points };

    let coefficients = series.coefficients();
    let summary = match stats::pearson(&trcd_values, &coefficients) {
        Some(coefficient) => CorrelationSummary {
            coefficient,
            p_value: stats::pearson_p_value(coefficient, trcd_values.len())
                .map_err(AnalysisError::Distribution)?,
        },
        None => {
            tracing::debug!(
                "{}: per-tRCD correlations are constant; reporting no trend",
                table.label()
            );
            CorrelationSummary {
                coefficient: 0.0,
                p_value: 1.0,
            }
        }
    };

    Ok(TimingCorrelation {
        label: table.label().clone(),
        series,
        summary,
    })
}

impl fmt::Display for TimingCorrelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, total correlation coefficient = {}, p-value = {}",
            self.label, self.summary.coefficient, self.summary.p_value
        )
    }
}
