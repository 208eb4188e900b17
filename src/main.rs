use asset_store::AssetStore;
use config::{Config, DisplayKind};
use image_classifier::impl_fake::ImageClassifierFake;
use image_classifier::interface::ImageClassifier;
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use pokedex::main::Pokedex;
use screen_display::impl_console::ScreenDisplayConsole;
use screen_display::impl_gui::ScreenDisplayGui;
use screen_display::interface::ScreenDisplay;
use std::path::PathBuf;
use std::sync::Arc;

mod asset_store;
mod config;
mod error;
mod image_classifier;
mod library;
mod pokedex;
mod radar_chart;
mod screen_composer;
mod screen_display;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let upload = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("usage: pokedex-screen <image>")?;

    let assets = match AssetStore::load(&config.assets, &config.attribute_schema, logger.clone()) {
        Ok(assets) => Arc::new(assets),
        Err(e) => {
            logger.error(&format!("startup aborted: {}", e))?;
            return Err(e.into());
        }
    };

    let image_classifier = build_image_classifier(&assets, logger.clone())?;

    let mut display: Box<dyn ScreenDisplay> = match config.display {
        DisplayKind::Console => Box::new(ScreenDisplayConsole::new(
            config.output_path.clone(),
            logger.clone(),
        )),
        DisplayKind::Gui => Box::new(ScreenDisplayGui::new("Pokedex")),
    };

    let pokedex = Pokedex::new(config, logger, assets, image_classifier);

    pokedex.handle_upload(&upload, display.as_mut())
}

#[cfg(feature = "onnx")]
fn build_image_classifier(
    assets: &AssetStore,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>> {
    use image_classifier::impl_tract_onnx::ImageClassifierTractOnnx;
    use image_classifier::models::model_config::ModelConfig;

    match (
        std::env::var_os("POKEDEX_MODEL"),
        std::env::var_os("POKEDEX_LABELS"),
    ) {
        (Some(model), Some(labels)) => {
            let config = ModelConfig::new(PathBuf::from(model), PathBuf::from(labels));
            Ok(Arc::new(ImageClassifierTractOnnx::new(config, logger)?))
        }
        _ => Ok(Arc::new(ImageClassifierFake::new(assets.class_names(), logger))),
    }
}

#[cfg(not(feature = "onnx"))]
fn build_image_classifier(
    assets: &AssetStore,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>> {
    Ok(Arc::new(ImageClassifierFake::new(assets.class_names(), logger)))
}
