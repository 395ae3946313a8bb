use super::{symlog::SymLog, ChartSize, RenderError};
use crate::analysis::{CorrelationSeries, ErrorCurve};
use plotters::prelude::*;
use std::path::Path;

const CAPTION_FONT: (&str, u32) = ("sans-serif", 20);
const SYMLOG_THRESHOLD: f64 = 0.01;
const MAX_ERROR_PERCENT: f64 = 100.0;

/// Scatter of error % over tRCD, one colour per retention bucket, on a
/// symlog y axis.
pub fn render_error_curves(
    out_path: &Path,
    title: &str,
    curves: &[ErrorCurve<'_>],
    size: ChartSize,
) -> Result<(), RenderError> {
    let scale = SymLog::new(SYMLOG_THRESHOLD);
    let x_max = curves
        .iter()
        .flat_map(|c| c.points().map(|(x, _)| x))
        .fold(0.0_f64, f64::max);
    let x_max = if x_max > 0.0 { x_max * 1.05 } else { 1.0 };

    let root = SVGBackend::new(out_path, size.as_tuple()).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, scale.forward(0.0)..scale.forward(MAX_ERROR_PERCENT))?;

    chart
        .configure_mesh()
        .x_desc("tRCD in ns")
        .y_desc("Errors in %")
        .y_label_formatter(&|v| format!("{:.2}", scale.inverse(*v)))
        .draw()?;

    for (idx, curve) in curves.iter().enumerate() {
        let color = Palette99::pick(idx).mix(0.9);
        chart
            .draw_series(
                curve
                    .points()
                    .map(|(x, y)| Circle::new((x, scale.forward(y)), 3, color.filled())),
            )?
            .label(curve.label())
            .legend(move |(x, y)| Circle::new((x + 8, y), 3, color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    tracing::info!("wrote {}", out_path.display());
    Ok(())
}

/// Per-tRCD correlation lines of several datasets on one [-1, 1] chart.
pub fn render_correlation(
    out_path: &Path,
    title: &str,
    series: &[(String, &CorrelationSeries)],
    size: ChartSize,
) -> Result<(), RenderError> {
    let (x_min, x_max) = series
        .iter()
        .flat_map(|(_, s)| s.trcd_values())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
    let (x_min, x_max) = if x_min < x_max {
        let pad = (x_max - x_min) * 0.05;
        (x_min - pad, x_max + pad)
    } else if x_min.is_finite() {
        (x_min - 1.0, x_min + 1.0)
    } else {
        (0.0, 1.0)
    };

    let root = SVGBackend::new(out_path, size.as_tuple()).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, -1.0..1.0)?;

    chart
        .configure_mesh()
        .x_desc("tRCD in ns")
        .y_desc("Correlation")
        .draw()?;

    for (idx, (label, s)) in series.iter().enumerate() {
        let color = Palette99::pick(idx).mix(0.9);
        chart
            .draw_series(LineSeries::new(s.points().iter().copied(), color.stroke_width(2)))?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    tracing::info!("wrote {}", out_path.display());
    Ok(())
}
