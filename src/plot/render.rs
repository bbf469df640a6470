//! Rasterization of a [`VisibilityFigure`].
//!
//! The chart is drawn into an RGB buffer and encoded in memory; the file is only written once
//! the whole PNG exists, so a failed rendering leaves nothing on disk.
use camino::Utf8Path;
use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};
use log::debug;
use plotters::{backend::RGBPixel, coord::Shift, prelude::*};

use crate::{
    neowise_errors::NeowiseError,
    plot::figure::{ColorBar, LegendPosition, LineStyle, VisibilityFigure},
};

/// Width of the color bar area, pixels
const COLORBAR_WIDTH: u32 = 120;

/// Dash length and spacing of dashed curves, pixels
const DASH: (i32, i32) = (10, 6);

/// Something that can store a figure at a path.
pub trait FigureWriter {
    fn write(&self, figure: &VisibilityFigure, path: &Utf8Path) -> Result<(), NeowiseError>;
}

/// Writes figures as PNG files through the plotters bitmap backend.
///
/// An existing file at the same path is overwritten.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngWriter;

impl PngWriter {
    /// The PNG image of `figure`.
    pub fn encode(&self, figure: &VisibilityFigure) -> Result<Vec<u8>, NeowiseError> {
        debug!("rendering {}x{} chart", figure.width, figure.height);

        let mut pixels = vec![0_u8; figure.width as usize * figure.height as usize * 3];
        rasterize(figure, &mut pixels)?;
        encode_png(&pixels, figure.width, figure.height)
    }
}

impl FigureWriter for PngWriter {
    fn write(&self, figure: &VisibilityFigure, path: &Utf8Path) -> Result<(), NeowiseError> {
        let png = self.encode(figure)?;
        std::fs::write(path, &png)?;
        debug!("{} bytes written to {path}", png.len());
        Ok(())
    }
}

/// Draw `figure` into `pixels`, an RGB buffer of `width × height` pixels.
fn rasterize(figure: &VisibilityFigure, pixels: &mut [u8]) -> Result<(), NeowiseError> {
    let root = BitMapBackend::<RGBPixel>::with_buffer_and_format(
        pixels,
        (figure.width, figure.height),
    )
    .map_err(render_error)?
    .into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    match &figure.colorbar {
        Some(colorbar) => {
            let split = figure.width.saturating_sub(COLORBAR_WIDTH) as i32;
            let (main, side) = root.split_horizontally(split);
            draw_chart(figure, &main)?;
            draw_colorbar(colorbar, &side)?;
        }
        None => draw_chart(figure, &root)?,
    }

    root.present().map_err(render_error)
}

fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, NeowiseError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(pixels, width, height, ColorType::Rgb8)
        .map_err(render_error)?;
    Ok(png)
}

fn render_error<E: std::fmt::Display>(err: E) -> NeowiseError {
    NeowiseError::RenderError(err.to_string())
}

fn draw_chart(
    figure: &VisibilityFigure,
    area: &DrawingArea<BitMapBackend, Shift>,
) -> Result<(), NeowiseError> {
    let axes = &figure.axes;
    let (x0, x1) = axes.x_range;
    let (y0, y1) = axes.y_range;

    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(render_error)?;

    for fill in &figure.fills {
        chart
            .draw_series(
                fill.spans
                    .iter()
                    .map(|(start, end)| Rectangle::new([(*start, y0), (*end, y1)], fill.color.filled())),
            )
            .map_err(render_error)?;
    }

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(axes.x_ticks.len())
        .x_label_formatter(&|x| format!("{x:.0}"))
        .y_labels(10)
        .x_desc(axes.x_label.as_str())
        .y_desc(axes.y_label.as_str())
        .draw()
        .map_err(render_error)?;

    for curve in &figure.curves {
        let color = curve.color;
        let style = color.stroke_width(2);
        let points = curve.points.iter().copied();

        let series = match curve.style {
            LineStyle::Solid => chart.draw_series(LineSeries::new(points, style)),
            LineStyle::Dashed => {
                chart.draw_series(DashedLineSeries::new(points, DASH.0, DASH.1, style))
            }
        }
        .map_err(render_error)?;

        series
            .label(curve.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    for scatter in &figure.scatters {
        let size = scatter.marker_size;
        let key = scatter
            .colors
            .get(scatter.colors.len() / 2)
            .copied()
            .unwrap_or(BLACK);

        chart
            .draw_series(
                scatter
                    .points
                    .iter()
                    .zip(&scatter.colors)
                    .map(|(point, color)| Circle::new(*point, size, color.filled())),
            )
            .map_err(render_error)?
            .label(scatter.label.as_str())
            .legend(move |(x, y)| Circle::new((x + 10, y), 4, key.filled()));
    }

    if let Some(position) = figure.legend {
        let position = match position {
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
        };
        chart
            .configure_series_labels()
            .position(position)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_error)?;
    }

    Ok(())
}

fn draw_colorbar(
    colorbar: &ColorBar,
    area: &DrawingArea<BitMapBackend, Shift>,
) -> Result<(), NeowiseError> {
    let min = colorbar.min;
    // a flat data range still needs a drawable axis
    let max = if colorbar.max > min { colorbar.max } else { min + 1.0 };
    let step = (max - min) / colorbar.stops.len().max(1) as f64;

    let mut chart = ChartBuilder::on(area)
        .margin_top(20)
        .margin_bottom(70)
        .margin_right(10)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..1.0, min..max)
        .map_err(render_error)?;

    chart
        .draw_series(colorbar.stops.iter().enumerate().map(|(i, color)| {
            let low = min + step * i as f64;
            Rectangle::new([(0.0, low), (1.0, low + step)], color.filled())
        }))
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(8)
        .y_label_formatter(&|az| format!("{az:.0}"))
        .y_desc(colorbar.label.as_str())
        .draw()
        .map_err(render_error)?;

    Ok(())
}

#[cfg(test)]
mod render_test {
    use super::*;
    use crate::{config::PlotConfig, plot::plot_test::night};

    #[test]
    fn test_render_error_message() {
        let err = render_error("backend gone");
        assert_eq!(err, NeowiseError::RenderError("backend gone".into()));
        assert_eq!(
            err.to_string(),
            "Unable to render the visibility chart: backend gone"
        );
    }

    #[test]
    fn test_undersized_buffer() {
        let figure = VisibilityFigure::build(&night(), &PlotConfig::default());
        let mut pixels = vec![0_u8; 16];

        assert!(matches!(
            rasterize(&figure, &mut pixels),
            Err(NeowiseError::RenderError(_))
        ));
    }

    #[test]
    fn test_encode_png() {
        let pixels = [255_u8; 2 * 3 * 3];
        let png = encode_png(&pixels, 2, 3).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_png_written() {
        let dir = std::env::temp_dir().join(format!("neowise-render-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(dir.join("chart.png")).unwrap();

        let figure = VisibilityFigure::build(&night(), &PlotConfig::default());
        PngWriter.write(&figure, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_directory_is_an_io_error() {
        let dir = std::env::temp_dir().join(format!("neowise-render-missing-{}", std::process::id()));
        let path = camino::Utf8PathBuf::from_path_buf(dir.join("chart.png")).unwrap();

        let figure = VisibilityFigure::build(&night(), &PlotConfig::default());
        assert!(matches!(
            PngWriter.write(&figure, &path),
            Err(NeowiseError::IoError(_))
        ));
        assert!(!dir.exists());
    }
}
