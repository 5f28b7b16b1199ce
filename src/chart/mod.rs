//! SVG price/volume chart rendering.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::{info, warn};

use crate::core::Error;
use crate::history::PricePoint;

fn rerr(e: impl std::fmt::Display) -> Error {
    Error::Render(e.to_string())
}

/// Renders one chart for a ticker: close price line over volume bars, both on
/// the same date axis, saved as `{SYMBOL}_price_volume.svg` in `out_dir`.
///
/// An empty series is a logged no-op returning `Ok(None)` — short or missing
/// windows are expected near holidays and new listings, not render failures.
///
/// # Errors
///
/// Returns `Error::Io` when the output directory cannot be created and
/// `Error::Render` when the backend fails.
pub fn render_price_volume(
    out_dir: &Path,
    symbol: &str,
    series: &[PricePoint],
) -> Result<Option<PathBuf>, Error> {
    if series.is_empty() {
        warn!(symbol, "empty price series, skipping chart");
        return Ok(None);
    }

    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(format!("{symbol}_price_volume.svg"));

    let n = series.len() as i32;
    let (mut lo, mut hi) = series.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| {
        (lo.min(p.close), hi.max(p.close))
    });
    if lo == hi {
        // A flat (or single-point) series still needs a non-degenerate axis.
        lo -= 1.0;
        hi += 1.0;
    }
    let pad = (hi - lo) * 0.05;
    let vol_max = series.iter().map(|p| p.volume).max().unwrap_or(0).max(1) as f64;

    let date_label = |x: &i32| -> String {
        series
            .get(*x as usize)
            .map(|p| p.date.format("%m-%d").to_string())
            .unwrap_or_default()
    };

    {
        let root = SVGBackend::new(&path, (1000, 760)).into_drawing_area();
        root.fill(&WHITE).map_err(rerr)?;
        let (upper, lower) = root.split_vertically(500);

        let mut price_chart = ChartBuilder::on(&upper)
            .caption(
                format!("{symbol} daily close ({} sessions)", series.len()),
                ("sans-serif", 22),
            )
            .margin(12)
            .x_label_area_size(30)
            .y_label_area_size(70)
            .build_cartesian_2d(0..n, (lo - pad)..(hi + pad))
            .map_err(rerr)?;
        price_chart
            .configure_mesh()
            .x_labels(8)
            .x_label_formatter(&date_label)
            .y_desc("close")
            .draw()
            .map_err(rerr)?;
        price_chart
            .draw_series(LineSeries::new(
                series.iter().enumerate().map(|(i, p)| (i as i32, p.close)),
                &BLUE,
            ))
            .map_err(rerr)?;

        let mut volume_chart = ChartBuilder::on(&lower)
            .margin(12)
            .x_label_area_size(30)
            .y_label_area_size(70)
            .build_cartesian_2d(0..n, 0.0..vol_max * 1.05)
            .map_err(rerr)?;
        volume_chart
            .configure_mesh()
            .x_labels(8)
            .x_label_formatter(&date_label)
            .y_desc("volume")
            .draw()
            .map_err(rerr)?;
        volume_chart
            .draw_series(series.iter().enumerate().map(|(i, p)| {
                Rectangle::new(
                    [(i as i32, 0.0), (i as i32 + 1, p.volume as f64)],
                    BLUE.mix(0.4).filled(),
                )
            }))
            .map_err(rerr)?;

        root.present().map_err(rerr)?;
    }

    info!(symbol, path = %path.display(), "chart rendered");
    Ok(Some(path))
}
