use std::io::Cursor;
use std::path::Path;
use anyhow::Context;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::spectrum::{MarkerKind, SpectrumChart, SpectrumError};
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub curve: RGBColor,
    pub resonance: RGBColor,
    pub drive: RGBColor,
    pub grid: RGBColor,
    /// Caption and axis labels need a system font.
    pub labels: bool,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            background: RGBColor(10, 10, 10),
            curve: CYAN,
            resonance: RGBColor(255, 80, 80),
            drive: RGBColor(120, 220, 120),
            grid: RGBColor(60, 60, 60),
            labels: true,
        }
    }
}
impl PlotStyle {
    fn marker_color(&self, kind: MarkerKind) -> RGBColor {
        match kind {
            MarkerKind::Resonance => self.resonance,
            MarkerKind::Drive => self.drive,
        }
    }
}
/// Renders the current chart state, dashed markers included, to PNG bytes.
pub fn render_chart_png(chart: &SpectrumChart, style: &PlotStyle) -> Result<Vec<u8>, SpectrumError> {
    let (Some(x_axis), Some(y_axis)) = (chart.x_axis(), chart.y_axis()) else {
        return Err(SpectrumError::Plot("chart has nothing rendered yet".into()));
    };
    if !chart.has_data() {
        return Err(SpectrumError::Plot("chart has no curve".into()));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let x_range = x_axis.range.min..x_axis.range.max;
        let y_range = y_axis.min..y_axis.max;
        let mut builder = ChartBuilder::on(&root);
        builder.margin(10);
        if style.labels {
            builder
                .caption("IR Spectrum", ("sans-serif", 20).into_font().color(&WHITE))
                .set_label_area_size(LabelAreaPosition::Left, 45)
                .set_label_area_size(LabelAreaPosition::Bottom, 40);
        }
        let mut plot = builder.build_cartesian_2d(x_range, y_range)?;
        if style.labels {
            plot.configure_mesh()
                .disable_x_mesh()
                .light_line_style(&WHITE.mix(0.1))
                .x_desc("Wavelength (nm)")
                .draw()?;
        }
        let grid = style.grid;
        plot.draw_series(x_axis.ticks().map(|x| {
            PathElement::new(vec![(x, y_axis.min), (x, y_axis.max)], &grid)
        }))?;
        let curve = style.curve;
        plot.draw_series(LineSeries::new(
            chart.curve().iter().map(|p| (p.x, p.y)),
            &curve,
        ))?;
        for kind in MarkerKind::ALL {
            let color = style.marker_color(kind);
            plot.draw_series(chart.marker(kind).dashes().map(|d| {
                PathElement::new(vec![(d.x, d.y0), (d.x, d.y1)], color.stroke_width(2))
            }))?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// Writes a PNG snapshot of `chart` to `path`.
pub fn save_snapshot(chart: &SpectrumChart, style: &PlotStyle, path: &Path) -> anyhow::Result<()> {
    let png = render_chart_png(chart, style).context("rendering spectrum snapshot")?;
    std::fs::write(path, png).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, SpectrumError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| SpectrumError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::{SpectrumPayload, SpectrumRenderer};
    fn unlabeled() -> PlotStyle {
        PlotStyle {
            width: 320,
            height: 160,
            labels: false,
            ..Default::default()
        }
    }
    #[test]
    fn snapshot_is_png() {
        let mut chart = SpectrumChart::new(12);
        let payload = SpectrumPayload {
            samples: vec![1.0, 0.4, 0.2, 0.5, 1.0],
            x_min: Some(792.0),
            x_max: Some(798.0),
            resonance_freq: Some(795.0),
            drive_freq: Some(795.2),
            ..Default::default()
        };
        SpectrumRenderer::default()
            .update_graph(&mut chart, &payload)
            .unwrap();
        let png = render_chart_png(&chart, &unlabeled()).unwrap();
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
    }
    #[test]
    fn empty_chart_is_refused() {
        let chart = SpectrumChart::new(12);
        assert!(matches!(
            render_chart_png(&chart, &unlabeled()),
            Err(SpectrumError::Plot(_))
        ));
    }
}
