use crate::asset_store::attributes::{AttributeVector, Stat};
use crate::asset_store::{class_key, AssetStore};
use crate::config::{Config, ForegroundSource};
use crate::error::{PokedexError, Result};
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use crate::library::raster;
use crate::pokedex::outcome::{Outcome, FAILURE_MESSAGE, NOT_RECOGNIZED_MESSAGE};
use crate::radar_chart::render::RadarChartRenderer;
use crate::screen_composer::ScreenComposer;
use crate::screen_display::interface::ScreenDisplay;
use image::{DynamicImage, RgbaImage};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

/// Turns one uploaded picture into what the screen should show.
pub struct Pokedex {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    assets: Arc<AssetStore>,
    image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    chart_renderer: RadarChartRenderer,
    screen_composer: ScreenComposer,
    chart_cache: Mutex<HashMap<String, RgbaImage>>,
}

impl Pokedex {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        assets: Arc<AssetStore>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    ) -> Self {
        let chart_renderer = RadarChartRenderer::new(config.chart.clone(), logger.clone());
        let screen_composer = ScreenComposer::new(assets.clone(), config.layout, logger.clone());

        Self {
            logger: logger.with_namespace("pokedex"),
            config,
            assets,
            image_classifier,
            chart_renderer,
            screen_composer,
            chart_cache: Mutex::new(HashMap::new()),
        }
    }

    /// One interaction: read the upload, identify it, show the result.
    pub fn handle_upload(
        &self,
        path: &Path,
        display: &mut dyn ScreenDisplay,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!("upload {}", path.display()))?;
        let outcome = self.identify_path(path);
        display.show(&outcome)
    }

    pub fn identify_path(&self, path: &Path) -> Outcome {
        match std::fs::read(path) {
            Ok(bytes) => self.identify_bytes(&bytes),
            Err(e) => self.failed(&PokedexError::Decode(format!("{}: {}", path.display(), e))),
        }
    }

    pub fn identify_bytes(&self, bytes: &[u8]) -> Outcome {
        match raster::decode(bytes) {
            Ok(upload) => self.identify(&upload),
            Err(e) => self.failed(&e),
        }
    }

    pub fn identify(&self, upload: &DynamicImage) -> Outcome {
        match self.try_identify(upload) {
            Ok(outcome) => outcome,
            Err(e) => self.failed(&e),
        }
    }

    fn try_identify(&self, upload: &DynamicImage) -> Result<Outcome> {
        let classification = self
            .image_classifier
            .classify(&raster::to_rgb(upload))
            .map_err(|e| PokedexError::Classification(e.to_string()))?;

        // false for NaN
        let confident = classification.confidence >= self.config.confidence_threshold;
        if !confident {
            self.logger.info(&format!(
                "{} at {:.1}% is below the {:.1}% threshold",
                classification.label, classification.confidence, self.config.confidence_threshold
            ))?;
            return Ok(self.not_recognized());
        }

        match self.screen_for(&classification.label, upload) {
            Ok(screen) => {
                self.logger.info(&format!(
                    "recognized {} ({:.1}%)",
                    classification.label, classification.confidence
                ))?;
                Ok(Outcome::Recognized {
                    label: classification.label,
                    confidence: classification.confidence,
                    screen,
                })
            }
            Err(e) if e.is_unknown_class() => {
                self.logger.info(&format!("{}, showing fallback", e))?;
                Ok(self.not_recognized())
            }
            Err(e) => Err(e),
        }
    }

    /// Stats first: an unknown class stops before any drawing happens.
    pub fn screen_for(&self, class_name: &str, upload: &DynamicImage) -> Result<RgbaImage> {
        let attributes = self.assets.attributes(class_name)?;
        let foreground = match self.config.foreground_source {
            ForegroundSource::Sprite => Cow::Borrowed(self.assets.sprite(class_name)?),
            ForegroundSource::Photo => Cow::Owned(raster::to_rgba(upload)),
        };
        let chart = self.chart_for(class_name, attributes)?;

        self.screen_composer.compose_screen(&foreground, Some(&chart))
    }

    fn chart_for(&self, class_name: &str, attributes: &AttributeVector) -> Result<RgbaImage> {
        let key = class_key(class_name);
        let mut cache = self
            .chart_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(chart) = cache.get(&key) {
            self.logger.info(&format!("chart cache hit for {}", key))?;
            return Ok(chart.clone());
        }

        let stats: Vec<String> = Stat::ALL
            .iter()
            .map(|&stat| format!("{} {}", stat.label(), attributes.get(stat)))
            .collect();
        self.logger
            .info(&format!("rendering chart for {}: {}", key, stats.join(", ")))?;
        let chart = self
            .chart_renderer
            .render(class_name, &Stat::labels(), attributes.values())?;
        cache.insert(key, chart.clone());
        Ok(chart)
    }

    #[cfg(test)]
    pub fn cached_charts(&self) -> usize {
        self.chart_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn not_recognized(&self) -> Outcome {
        Outcome::NotRecognized {
            message: NOT_RECOGNIZED_MESSAGE.to_string(),
            image: self.assets.fallback().clone(),
        }
    }

    fn failed(&self, error: &PokedexError) -> Outcome {
        // nowhere left to report a broken logger
        let _ = self.logger.error(&error.to_string());
        Outcome::Failed {
            message: FAILURE_MESSAGE.to_string(),
        }
    }
}
