//! Pastes the foreground (sprite or photo) and the stat chart onto a copy of
//! the device template.

use crate::asset_store::AssetStore;
use crate::error::{PokedexError, Result};
use crate::library::logger::interface::Logger;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::sync::Arc;

/// Pixel positions of the two windows on the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub foreground_size: (u32, u32),
    pub foreground_offset: (i64, i64),
    pub chart_offset: (i64, i64),
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self {
            foreground_size: (450, 300),
            foreground_offset: (125, 288),
            chart_offset: (885, 325),
        }
    }
}

pub struct ScreenComposer {
    assets: Arc<AssetStore>,
    layout: ScreenLayout,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ScreenComposer {
    pub fn new(
        assets: Arc<AssetStore>,
        layout: ScreenLayout,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            assets,
            layout,
            logger: logger.with_namespace("screen_composer"),
        }
    }

    /// `compose` with the configured layout.
    pub fn compose_screen(
        &self,
        foreground: &RgbaImage,
        chart: Option<&RgbaImage>,
    ) -> Result<RgbaImage> {
        self.compose(
            foreground,
            self.layout.foreground_size,
            self.layout.foreground_offset,
            chart,
            self.layout.chart_offset,
        )
    }

    /// Returns a new image; neither the template nor the inputs are touched.
    pub fn compose(
        &self,
        foreground: &RgbaImage,
        foreground_size: (u32, u32),
        foreground_offset: (i64, i64),
        chart: Option<&RgbaImage>,
        chart_offset: (i64, i64),
    ) -> Result<RgbaImage> {
        let template = self.assets.template();
        let canvas = template.dimensions();

        if foreground.width() == 0 || foreground.height() == 0 {
            return Err(PokedexError::Composition("foreground is empty".to_string()));
        }
        if foreground_size.0 == 0 || foreground_size.1 == 0 {
            return Err(PokedexError::Composition(format!(
                "foreground target size {}x{} is empty",
                foreground_size.0, foreground_size.1
            )));
        }
        ensure_overlaps(canvas, foreground_size, foreground_offset, "foreground")?;
        if let Some(chart) = chart {
            ensure_overlaps(canvas, chart.dimensions(), chart_offset, "chart")?;
        }

        let mut screen = template.clone();
        let resized = imageops::resize(
            foreground,
            foreground_size.0,
            foreground_size.1,
            FilterType::Triangle,
        );
        imageops::overlay(&mut screen, &resized, foreground_offset.0, foreground_offset.1);

        if let Some(chart) = chart {
            imageops::overlay(&mut screen, chart, chart_offset.0, chart_offset.1);
        }

        self.logger.info(&format!(
            "composed {}x{} screen (chart: {})",
            screen.width(),
            screen.height(),
            chart.is_some()
        ))?;
        Ok(screen)
    }
}

fn ensure_overlaps(
    canvas: (u32, u32),
    size: (u32, u32),
    offset: (i64, i64),
    what: &str,
) -> Result<()> {
    let overlaps =
        |start: i64, len: u32, bound: u32| start < bound as i64 && start + len as i64 > 0;
    if overlaps(offset.0, size.0, canvas.0) && overlaps(offset.1, size.1, canvas.1) {
        Ok(())
    } else {
        Err(PokedexError::Composition(format!(
            "{} {}x{} at ({}, {}) is outside the {}x{} canvas",
            what, size.0, size.1, offset.0, offset.1, canvas.0, canvas.1
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_store::attributes::AttributeTable;
    use crate::library::logger::impl_fake::LoggerFake;
    use image::Rgba;
    use std::collections::HashMap;

    const BACKGROUND: Rgba<u8> = Rgba([20, 40, 60, 255]);
    const GREEN: Rgba<u8> = Rgba([0, 200, 0, 255]);

    fn composer(layout: ScreenLayout) -> (Arc<AssetStore>, ScreenComposer) {
        let assets = Arc::new(AssetStore::from_parts(
            RgbaImage::from_pixel(1400, 800, BACKGROUND),
            HashMap::new(),
            AttributeTable::default(),
            RgbaImage::new(1, 1),
        ));
        let composer = ScreenComposer::new(assets.clone(), layout, Arc::new(LoggerFake::new()));
        (assets, composer)
    }

    /// Opaque green square with a fully transparent left half.
    fn half_transparent_sprite() -> RgbaImage {
        RgbaImage::from_fn(90, 60, |x, _| {
            if x < 45 {
                Rgba([255, 0, 255, 0])
            } else {
                GREEN
            }
        })
    }

    #[test]
    fn foreground_lands_at_offset_with_target_size() {
        let (_, composer) = composer(ScreenLayout::default());
        let sprite = RgbaImage::from_pixel(45, 30, GREEN);

        let screen = composer.compose_screen(&sprite, None).unwrap();

        assert_eq!(screen.dimensions(), (1400, 800));
        assert_eq!(*screen.get_pixel(125, 288), GREEN);
        assert_eq!(*screen.get_pixel(125 + 449, 288 + 299), GREEN);
        assert_eq!(*screen.get_pixel(124, 288), BACKGROUND);
        assert_eq!(*screen.get_pixel(125 + 450, 288), BACKGROUND);
        assert_eq!(*screen.get_pixel(125, 288 + 300), BACKGROUND);
    }

    #[test]
    fn transparent_foreground_pixels_keep_the_template() {
        let (_, composer) = composer(ScreenLayout::default());

        let screen = composer
            .compose_screen(&half_transparent_sprite(), None)
            .unwrap();

        assert_eq!(*screen.get_pixel(130, 400), BACKGROUND);
        assert_eq!(*screen.get_pixel(125 + 440, 400), GREEN);
    }

    #[test]
    fn resize_blends_instead_of_picking_nearest_pixels() {
        let (_, composer) = composer(ScreenLayout::default());
        let checker = RgbaImage::from_fn(2, 2, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });

        let screen = composer.compose_screen(&checker, None).unwrap();

        let middle = screen.get_pixel(125 + 225, 288 + 150);
        assert!(middle[0] > 20 && middle[0] < 235, "{middle:?}");
    }

    #[test]
    fn chart_is_blended_at_its_own_offset() {
        let (_, composer) = composer(ScreenLayout::default());
        let chart = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));

        let screen = composer
            .compose_screen(&RgbaImage::from_pixel(4, 4, GREEN), Some(&chart))
            .unwrap();

        assert_eq!(*screen.get_pixel(885, 325), Rgba([255, 0, 0, 255]));
        assert_eq!(*screen.get_pixel(894, 334), Rgba([255, 0, 0, 255]));
        assert_eq!(*screen.get_pixel(895, 335), BACKGROUND);
    }

    #[test]
    fn inputs_and_template_are_left_untouched() {
        let (assets, composer) = composer(ScreenLayout::default());
        let template_before = assets.template().clone();
        let sprite = half_transparent_sprite();
        let sprite_before = sprite.clone();
        let chart = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 128]));
        let chart_before = chart.clone();

        for _ in 0..3 {
            composer.compose_screen(&sprite, Some(&chart)).unwrap();
        }

        assert_eq!(*assets.template(), template_before);
        assert_eq!(sprite, sprite_before);
        assert_eq!(chart, chart_before);
    }

    #[test]
    fn composing_twice_gives_identical_screens() {
        let (_, composer) = composer(ScreenLayout::default());
        let sprite = half_transparent_sprite();
        let chart = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 128]));

        let first = composer.compose_screen(&sprite, Some(&chart)).unwrap();
        let second = composer.compose_screen(&sprite, Some(&chart)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn foreground_outside_canvas_is_rejected() {
        let (_, composer) = composer(ScreenLayout::default());
        let sprite = RgbaImage::from_pixel(4, 4, GREEN);

        for offset in [(1400, 0), (0, 800), (-450, 0), (0, -300)] {
            let err = composer
                .compose(&sprite, (450, 300), offset, None, (0, 0))
                .unwrap_err();
            assert!(matches!(err, PokedexError::Composition(_)), "{offset:?}");
        }
    }

    #[test]
    fn partially_visible_foreground_is_clipped() {
        let (_, composer) = composer(ScreenLayout::default());
        let sprite = RgbaImage::from_pixel(4, 4, GREEN);

        let screen = composer
            .compose(&sprite, (450, 300), (1300, -100), None, (0, 0))
            .unwrap();

        assert_eq!(*screen.get_pixel(1399, 0), GREEN);
    }

    #[test]
    fn chart_outside_canvas_is_rejected() {
        let (_, composer) = composer(ScreenLayout::default());
        let chart = RgbaImage::from_pixel(10, 10, GREEN);

        let sprite = RgbaImage::from_pixel(4, 4, GREEN);

        let err = composer
            .compose(&sprite, (450, 300), (125, 288), Some(&chart), (5000, 5000))
            .unwrap_err();

        assert!(matches!(err, PokedexError::Composition(_)));
    }

    #[test]
    fn empty_target_size_is_rejected() {
        let (_, composer) = composer(ScreenLayout::default());
        let sprite = RgbaImage::from_pixel(4, 4, GREEN);
        let err = composer
            .compose(&sprite, (0, 300), (125, 288), None, (0, 0))
            .unwrap_err();
        assert!(matches!(err, PokedexError::Composition(_)));
    }
}
