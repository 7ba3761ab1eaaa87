//! Scatter chart of the lap time series.
//!
//! Rendering happens into an in-memory RGB buffer with the `plotters` bitmap backend. The buffer
//! is handed out as an `image::RgbImage` so that encoding and writing stay separate steps.

use std::error::Error;
use std::fmt;
use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use helpers::general::finite_min_max;
use image::{ImageOutputFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;

/// ChartError carries a human-readable message about why a chart could not be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    LengthMismatch { xs: usize, ys: usize },
    NoData,
    EmptyCanvas,
    Drawing(String),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChartError::LengthMismatch { xs, ys } => {
                write!(f, "Number of x values ({}) and y values ({}) must be equal", xs, ys)
            }
            ChartError::NoData => write!(f, "No finite data points to plot"),
            ChartError::EmptyCanvas => write!(f, "Canvas width and height must be non-zero"),
            ChartError::Drawing(msg) => write!(f, "Drawing failed: {}", msg),
        }
    }
}

impl Error for ChartError {}

/// ChartStyle controls the decorations around the data points. `plain` draws points only and
/// does not require any system fonts.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub caption: Option<String>,
    pub x_desc: String,
    pub y_desc: String,
    pub draw_mesh: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            caption: Some("Lap time".to_owned()),
            x_desc: "Iteration".to_owned(),
            y_desc: "s".to_owned(),
            draw_mesh: true,
        }
    }
}

impl ChartStyle {
    pub fn plain() -> Self {
        ChartStyle {
            caption: None,
            x_desc: String::new(),
            y_desc: String::new(),
            draw_mesh: false,
        }
    }
}

/// axis_range pads the data range by 5% on both sides, or by one unit if it is degenerate.
fn axis_range(min: f64, max: f64) -> std::ops::Range<f64> {
    if max > min {
        let margin = (max - min) * 0.05;
        (min - margin)..(max + margin)
    } else {
        (min - 1.0)..(max + 1.0)
    }
}

fn draw_scatter_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    points: &[(f64, f64)],
    style: &ChartStyle,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    let (x_min, x_max) = finite_min_max(&xs).ok_or(ChartError::NoData)?;
    let (y_min, y_max) = finite_min_max(&ys).ok_or(ChartError::NoData)?;

    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(root);
    builder.margin(20);
    if let Some(caption) = &style.caption {
        builder.caption(caption, ("sans-serif", 24).into_font());
    }
    if style.draw_mesh {
        builder.x_label_area_size(40).y_label_area_size(60);
    }
    let mut chart = builder.build_cartesian_2d(axis_range(x_min, x_max), axis_range(y_min, y_max))?;

    if style.draw_mesh {
        chart
            .configure_mesh()
            .x_desc(style.x_desc.as_str())
            .y_desc(style.y_desc.as_str())
            .label_style(("sans-serif", 16))
            .axis_desc_style(("sans-serif", 16))
            .draw()?;
    }

    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, BLUE.filled())),
    )?;

    root.present()?;
    Ok(())
}

/// render_scatter draws the points `(xs[i], ys[i])` into a `width` x `height` image. Points with
/// a non-finite coordinate are skipped.
pub fn render_scatter(
    xs: &[f64],
    ys: &[f64],
    width: u32,
    height: u32,
    style: &ChartStyle,
) -> Result<RgbImage, ChartError> {
    if xs.len() != ys.len() {
        return Err(ChartError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }
    if width == 0 || height == 0 {
        return Err(ChartError::EmptyCanvas);
    }

    let points: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();
    if points.is_empty() {
        return Err(ChartError::NoData);
    }

    let mut buf = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        draw_scatter_on_area(&root, &points, style).map_err(|e| ChartError::Drawing(e.to_string()))?;
    }

    RgbImage::from_raw(width, height, buf)
        .ok_or_else(|| ChartError::Drawing("Pixel buffer does not match canvas size".to_owned()))
}

/// encode_png serializes the image to PNG bytes.
pub fn encode_png(image: &RgbImage) -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .context("Failed to encode chart as PNG!")?;
    Ok(bytes)
}

pub fn write_png(bytes: &[u8], path: &Path) -> std::io::Result<()> {
    std::fs::write(path, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unequal_lengths() {
        let err = render_scatter(&[0.0, 1.0], &[1.0], 60, 40, &ChartStyle::plain()).unwrap_err();
        assert_eq!(err, ChartError::LengthMismatch { xs: 2, ys: 1 });
        assert!(err.to_string().contains("must be equal"));
    }

    #[test]
    fn rejects_empty_canvas() {
        let err = render_scatter(&[0.0], &[1.0], 0, 40, &ChartStyle::plain()).unwrap_err();
        assert_eq!(err, ChartError::EmptyCanvas);
    }

    #[test]
    fn rejects_series_without_finite_points() {
        assert_eq!(
            render_scatter(&[], &[], 60, 40, &ChartStyle::plain()).unwrap_err(),
            ChartError::NoData
        );
        assert_eq!(
            render_scatter(&[0.0, 1.0], &[f64::NAN, f64::INFINITY], 60, 40, &ChartStyle::plain())
                .unwrap_err(),
            ChartError::NoData
        );
    }

    #[test]
    fn renders_and_encodes_png() {
        let xs: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 10.0 - 0.1 * x).collect();
        let img = render_scatter(&xs, &ys, 120, 80, &ChartStyle::plain()).unwrap();
        assert_eq!(img.dimensions(), (120, 80));
        // at least one point is drawn in non-white
        assert!(img.pixels().any(|p| p.0 != [255, 255, 255]));

        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn single_point_gets_padded_axis() {
        let r = axis_range(5.0, 5.0);
        assert_eq!(r, 4.0..6.0);
        assert!(render_scatter(&[0.0], &[9.9], 120, 80, &ChartStyle::plain()).is_ok());
    }
}
