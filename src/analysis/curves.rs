use crate::data::{MeasurementRow, MeasurementTable};

/// Retention times the systematic test steps through: 0 s to 120 s in 20 s steps.
pub fn default_retention_buckets() -> Vec<f64> {
    (0..140).step_by(20).map(f64::from).collect()
}

/// Every measurement taken at one retention time, as (tRCD, error %) points.
#[derive(Clone, Copy, Debug)]
pub struct ErrorCurve<'a> {
    retention_secs: f64,
    rows: &'a [MeasurementRow],
}

impl<'a> ErrorCurve<'a> {
    pub fn retention_secs(&self) -> f64 {
        self.retention_secs
    }

    pub fn label(&self) -> String {
        format!("{}s", self.retention_secs())
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + 'a {
        let retention = self.retention_secs;
        self.rows
            .iter()
            .filter(move |row| row.retention_secs == retention)
            .map(|row| (row.trcd_ns, row.error_percent))
    }
}

pub fn error_curves_by_retention<'a>(
    table: &'a MeasurementTable,
    buckets: &[f64],
) -> Vec<ErrorCurve<'a>> {
    buckets
        .iter()
        .map(|&retention_secs| ErrorCurve {
            retention_secs,
            rows: table.rows(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{row, table};

    fn sample() -> MeasurementTable {
        table(vec![
            row(2.5, 0.0, 0.0),
            row(5.0, 0.0, 0.0),
            row(2.5, 12.5, 20.0),
            row(5.0, 3.0, 20.0),
            row(2.5, 40.0, 40.0),
            row(2.5, 13.0, 20.0),
        ])
    }

    #[test]
    fn default_buckets_step_by_twenty_seconds() {
        assert_eq!(
            default_retention_buckets(),
            vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0, 120.0]
        );
    }

    #[test]
    fn every_matching_row_becomes_a_point() {
        let t = sample();
        let curves = error_curves_by_retention(&t, &[20.0, 40.0]);
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].label(), "20s");
        assert_eq!(
            curves[0].points().collect::<Vec<_>>(),
            vec![(2.5, 12.5), (5.0, 3.0), (2.5, 13.0)]
        );
        assert_eq!(curves[1].points().collect::<Vec<_>>(), vec![(2.5, 40.0)]);
    }

    #[test]
    fn empty_bucket_yields_no_points() {
        let t = sample();
        let curves = error_curves_by_retention(&t, &[100.0]);
        assert_eq!(curves[0].retention_secs(), 100.0);
        assert_eq!(curves[0].points().count(), 0);
    }

    #[test]
    fn repeated_queries_agree() {
        let t = sample();
        let buckets = default_retention_buckets();
        let first: Vec<Vec<(f64, f64)>> = error_curves_by_retention(&t, &buckets)
            .iter()
            .map(|c| c.points().collect())
            .collect();
        let second: Vec<Vec<(f64, f64)>> = error_curves_by_retention(&t, &buckets)
            .iter()
            .map(|c| c.points().collect())
            .collect();
        assert_eq!(first, second);
    }
}
