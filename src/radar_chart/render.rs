use crate::error::{PokedexError, Result};
use crate::library::logger::interface::Logger;
use crate::radar_chart::geometry::{RadarGeometry, LABEL_RADIUS_FACTOR};
use crate::radar_chart::glyphs;
use image::{imageops, Rgba, RgbaImage};
use std::sync::Arc;
use tiny_skia::{FillRule, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

/// Transparent margin kept around the drawn content after cropping.
const PADDING: f32 = 4.0;
const MIN_RADIUS: f32 = 16.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Preferred canvas side; grows if labels would not fit.
    pub canvas_size_px: u32,
    /// Value at the outer edge. `None` uses the largest value.
    pub cap: Option<f64>,
    pub line_color: Rgba<u8>,
    pub line_width: f32,
    pub fill_opacity: f32,
    pub label_color: Rgba<u8>,
    pub label_scale: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            canvas_size_px: 320,
            cap: None,
            line_color: Rgba([214, 40, 57, 255]),
            line_width: 2.0,
            fill_opacity: 0.3,
            label_color: Rgba([32, 32, 32, 255]),
            label_scale: 2,
        }
    }
}

pub struct RadarChartRenderer {
    style: ChartStyle,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl RadarChartRenderer {
    pub fn new(style: ChartStyle, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            style,
            logger: logger.with_namespace("radar_chart"),
        }
    }

    /// Renders the closed stat polygon and its axis labels on a transparent
    /// canvas, cropped to the drawn content.
    pub fn render<S: AsRef<str>>(
        &self,
        class_name: &str,
        labels: &[S],
        values: &[f64],
    ) -> Result<RgbaImage> {
        let geometry = RadarGeometry::new(labels, values, self.style.cap)?;
        let scale = self.style.label_scale.max(1);

        let widest_label = labels
            .iter()
            .map(|label| glyphs::text_width(label.as_ref(), scale))
            .max()
            .unwrap_or(0);
        let half_label = widest_label.max(glyphs::text_height(scale)) as f32 / 2.0;

        let hint = self.style.canvas_size_px as f32;
        let radius = ((hint / 2.0 - half_label - PADDING) / LABEL_RADIUS_FACTOR).max(MIN_RADIUS);
        let extent =
            radius * LABEL_RADIUS_FACTOR + half_label + self.style.line_width + 2.0 * PADDING;
        let side = (2.0 * extent).ceil() as u32;
        let center = (side as f32 / 2.0, side as f32 / 2.0);

        let mut pixmap = Pixmap::new(side, side).ok_or_else(|| {
            PokedexError::InvalidChartInput(format!("cannot allocate a {0}x{0} canvas", side))
        })?;

        if !geometry.is_degenerate() {
            if let Some(path) = polygon_path(&geometry.outline(center, radius)) {
                self.draw_polygon(&mut pixmap, &path);
            }
        }

        let mut chart = to_rgba(&pixmap);
        for (index, axis) in geometry.axes.iter().enumerate() {
            let (x, y) = geometry.label_anchor(index, center, radius);
            let width = glyphs::text_width(&axis.label, scale) as f32;
            let height = glyphs::text_height(scale) as f32;
            glyphs::draw_text(
                &mut chart,
                (x - width / 2.0).round() as i64,
                (y - height / 2.0).round() as i64,
                &axis.label,
                scale,
                self.style.label_color,
            );
        }

        let chart = crop_to_content(&chart, PADDING as u32);
        self.logger.info(&format!(
            "{}: {} axes, max {}, {}x{}",
            class_name,
            geometry.axes.len(),
            geometry.max_value,
            chart.width(),
            chart.height()
        ))?;
        Ok(chart)
    }

    fn draw_polygon(&self, pixmap: &mut Pixmap, path: &Path) {
        let [r, g, b, a] = self.style.line_color.0;
        let fill_alpha = (self.style.fill_opacity.clamp(0.0, 1.0) * a as f32).round() as u8;

        let mut fill = Paint::default();
        fill.set_color_rgba8(r, g, b, fill_alpha);
        fill.anti_alias = true;
        pixmap.fill_path(path, &fill, FillRule::Winding, Transform::identity(), None);

        let mut line = Paint::default();
        line.set_color_rgba8(r, g, b, a);
        line.anti_alias = true;
        let stroke = Stroke {
            width: self.style.line_width,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        pixmap.stroke_path(path, &line, &stroke, Transform::identity(), None);
    }
}

fn polygon_path(points: &[(f32, f32)]) -> Option<Path> {
    let ((x, y), rest) = points.split_first()?;
    let mut builder = PathBuilder::new();
    builder.move_to(*x, *y);
    for (x, y) in rest {
        builder.line_to(*x, *y);
    }
    builder.close();
    builder.finish()
}

/// tiny-skia stores premultiplied pixels; the rest of the crate uses
/// straight alpha.
fn to_rgba(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (pixel, source) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = source.demultiply();
        *pixel = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image
}

fn crop_to_content(image: &RgbaImage, padding: u32) -> RgbaImage {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((left, top, right, bottom)) => {
                (left.min(x), top.min(y), right.max(x), bottom.max(y))
            }
        });
    }

    let Some((left, top, right, bottom)) = bounds else {
        return image.clone();
    };
    let left = left.saturating_sub(padding);
    let top = top.saturating_sub(padding);
    let right = (right + padding).min(image.width() - 1);
    let bottom = (bottom + padding).min(image.height() - 1);

    imageops::crop_imm(image, left, top, right - left + 1, bottom - top + 1).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_store::attributes::Stat;
    use crate::library::logger::impl_fake::LoggerFake;

    const BULBASAUR: [f64; 6] = [45.0, 49.0, 49.0, 65.0, 65.0, 45.0];

    fn renderer(style: ChartStyle) -> RadarChartRenderer {
        RadarChartRenderer::new(style, Arc::new(LoggerFake::new()))
    }

    fn corners_are_transparent(image: &RgbaImage) -> bool {
        let (w, h) = image.dimensions();
        [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)]
            .iter()
            .all(|&(x, y)| image.get_pixel(x, y)[3] == 0)
    }

    #[test]
    fn chart_has_content_and_transparent_corners() {
        let chart = renderer(ChartStyle::default())
            .render("bulbasaur", &Stat::labels(), &BULBASAUR)
            .unwrap();

        assert!(chart.width() > 0 && chart.height() > 0);
        assert!(chart.pixels().any(|p| p[3] > 0));
        assert!(corners_are_transparent(&chart));
    }

    #[test]
    fn triangle_with_short_labels_also_has_transparent_corners() {
        let chart = renderer(ChartStyle::default())
            .render("tri", &["a", "b", "c"], &[3.0, 1.0, 2.0])
            .unwrap();
        assert!(corners_are_transparent(&chart));
    }

    #[test]
    fn interior_is_semi_transparent_fill() {
        let style = ChartStyle {
            label_color: Rgba([0, 0, 255, 255]),
            ..ChartStyle::default()
        };
        let chart = renderer(style.clone())
            .render("even", &["a", "b", "c", "d"], &[10.0, 10.0, 10.0, 10.0])
            .unwrap();

        // polygon is symmetric, so the crop keeps its center in the middle
        let center = chart.get_pixel(chart.width() / 2, chart.height() / 2);
        let expected_alpha = (0.3f32 * 255.0).round() as i32;
        assert!((center[3] as i32 - expected_alpha).abs() <= 2, "{center:?}");
        for channel in 0..3 {
            assert!((center[channel] as i32 - style.line_color[channel] as i32).abs() <= 3);
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let renderer = renderer(ChartStyle::default());
        let first = renderer
            .render("bulbasaur", &Stat::labels(), &BULBASAUR)
            .unwrap();
        let second = renderer
            .render("bulbasaur", &Stat::labels(), &BULBASAUR)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn all_zero_values_still_render_labels() {
        let chart = renderer(ChartStyle::default())
            .render("zero", &Stat::labels(), &[0.0; 6])
            .unwrap();

        assert!(chart.pixels().any(|p| p[3] > 0));
        assert!(corners_are_transparent(&chart));
    }

    #[test]
    fn tiny_canvas_hint_still_fits_labels() {
        let style = ChartStyle {
            canvas_size_px: 10,
            ..ChartStyle::default()
        };
        let chart = renderer(style)
            .render("bulbasaur", &Stat::labels(), &BULBASAUR)
            .unwrap();
        assert!(corners_are_transparent(&chart));
    }

    #[test]
    fn invalid_input_produces_no_chart() {
        let err = renderer(ChartStyle::default())
            .render("bad", &Stat::labels(), &[1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, PokedexError::InvalidChartInput(_)));
    }

    #[test]
    fn crop_keeps_padding_around_content() {
        let mut image = RgbaImage::new(50, 50);
        image.put_pixel(20, 30, Rgba([1, 2, 3, 255]));

        let cropped = crop_to_content(&image, 4);

        assert_eq!(cropped.dimensions(), (9, 9));
        assert_eq!(*cropped.get_pixel(4, 4), Rgba([1, 2, 3, 255]));
    }
}
