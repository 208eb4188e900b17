use crate::asset_store::attributes::AttributeSchema;
use crate::radar_chart::render::ChartStyle;
use crate::screen_composer::ScreenLayout;
use chrono::{FixedOffset, Offset, Utc};
use std::path::{Path, PathBuf};

/// What gets pasted into the screen window next to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForegroundSource {
    /// The reference sprite of the recognised class.
    Sprite,
    /// The photo the user uploaded.
    Photo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    Console,
    Gui,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetPaths {
    pub template: PathBuf,
    pub sprites_dir: PathBuf,
    pub attributes: PathBuf,
    pub fallback: PathBuf,
}

impl AssetPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            template: dir.join("ecran_pokedex.png"),
            sprites_dir: dir.join("sprites"),
            attributes: dir.join("pokemon.csv"),
            fallback: dir.join("not_found.png"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub assets: AssetPaths,
    pub attribute_schema: AttributeSchema,
    pub output_path: PathBuf,
    /// Minimum classifier confidence, in percent, for the success branch.
    pub confidence_threshold: f32,
    pub foreground_source: ForegroundSource,
    pub layout: ScreenLayout,
    pub chart: ChartStyle,
    pub display: DisplayKind,
    pub logger_timezone: FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assets: AssetPaths::in_dir(Path::new("assets")),
            attribute_schema: AttributeSchema::default(),
            output_path: PathBuf::from("pokedex_screen.png"),
            confidence_threshold: 60.0,
            foreground_source: ForegroundSource::Sprite,
            layout: ScreenLayout::default(),
            chart: ChartStyle::default(),
            display: DisplayKind::Console,
            logger_timezone: central_european_time(),
        }
    }
}

impl Config {
    pub fn with_assets_dir(mut self, dir: &Path) -> Self {
        self.assets = AssetPaths::in_dir(dir);
        self
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `POKEDEX_*` variables resolved through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("POKEDEX_ASSETS") {
            config = config.with_assets_dir(Path::new(&dir));
        }
        if let Some(output) = lookup("POKEDEX_OUTPUT") {
            config.output_path = PathBuf::from(output);
        }
        if let Some(source) = lookup("POKEDEX_FOREGROUND") {
            if source.eq_ignore_ascii_case("photo") {
                config.foreground_source = ForegroundSource::Photo;
            }
        }
        if let Some(display) = lookup("POKEDEX_DISPLAY") {
            if display.eq_ignore_ascii_case("gui") {
                config.display = DisplayKind::Gui;
            }
        }

        config
    }
}

fn central_european_time() -> FixedOffset {
    FixedOffset::east_opt(3600).unwrap_or_else(|| Utc.fix())
}
