//! Static assets loaded once at startup and only read afterwards.

pub mod attributes;

use crate::asset_store::attributes::{AttributeSchema, AttributeTable, AttributeVector};
use crate::config::AssetPaths;
use crate::error::{PokedexError, Result};
use crate::library::logger::interface::Logger;
use crate::library::raster;
use image::{ImageFormat, RgbaImage};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Normalised lookup key shared by sprites, the attribute table and
/// classifier labels.
pub fn class_key(name: &str) -> String {
    name.trim().to_lowercase()
}

pub struct AssetStore {
    template: RgbaImage,
    sprites: HashMap<String, RgbaImage>,
    attributes: AttributeTable,
    fallback: RgbaImage,
}

impl AssetStore {
    pub fn load(
        paths: &AssetPaths,
        schema: &AttributeSchema,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self> {
        let logger = logger.with_namespace("asset_store");

        let template = load_template(&paths.template)?;
        logger.info(&format!(
            "template {} ({}x{})",
            paths.template.display(),
            template.width(),
            template.height()
        ))?;

        let sprites = load_sprites(&paths.sprites_dir)?;
        logger.info(&format!(
            "{} sprites from {}",
            sprites.len(),
            paths.sprites_dir.display()
        ))?;

        let attributes = load_attributes(&paths.attributes, schema)?;
        logger.info(&format!(
            "{} attribute rows from {}",
            attributes.len(),
            paths.attributes.display()
        ))?;

        let fallback = raster::open_rgba(&paths.fallback)?;

        Ok(Self::from_parts(template, sprites, attributes, fallback))
    }

    pub fn from_parts(
        template: RgbaImage,
        sprites: HashMap<String, RgbaImage>,
        attributes: AttributeTable,
        fallback: RgbaImage,
    ) -> Self {
        let sprites = sprites
            .into_iter()
            .map(|(name, sprite)| (class_key(&name), sprite))
            .collect();
        Self {
            template,
            sprites,
            attributes,
            fallback,
        }
    }

    /// Shared base canvas. Copy before drawing on it.
    pub fn template(&self) -> &RgbaImage {
        &self.template
    }

    pub fn fallback(&self) -> &RgbaImage {
        &self.fallback
    }

    pub fn sprite(&self, class_name: &str) -> Result<&RgbaImage> {
        self.sprites
            .get(&class_key(class_name))
            .ok_or_else(|| PokedexError::UnknownClass(class_name.to_string()))
    }

    pub fn attributes(&self, class_name: &str) -> Result<&AttributeVector> {
        self.attributes.get(class_name)
    }

    /// Sorted sprite keys.
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sprites.keys().cloned().collect();
        names.sort();
        names
    }
}

pub fn load_template(path: &Path) -> Result<RgbaImage> {
    raster::open_rgba(path)
}

/// Decodes every image file in `dir`, keyed by lowercased file stem.
/// One bad file fails the whole load; the error lists all of them. Two files
/// with the same key (e.g. `Pikachu.png` and `pikachu.bmp`) count as bad.
pub fn load_sprites(dir: &Path) -> Result<HashMap<String, RgbaImage>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| PokedexError::asset_load(dir, format!("cannot read directory: {}", e)))?;

    let mut failures = Vec::new();
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => paths.push(entry.path()),
            Err(e) => failures.push(format!("unreadable entry ({})", e)),
        }
    }
    paths.retain(|path| path.is_file() && ImageFormat::from_path(path).is_ok());
    paths.sort();

    let mut sources: HashMap<String, PathBuf> = HashMap::new();
    let mut sprites = HashMap::new();
    for path in paths {
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            failures.push(format!("{} (file name is not valid UTF-8)", path.display()));
            continue;
        };
        let key = class_key(stem);
        if let Some(first) = sources.get(&key) {
            failures.push(format!(
                "{} (duplicates {} as class {:?})",
                path.display(),
                first.display(),
                key
            ));
            continue;
        }
        match image::open(&path) {
            Ok(image) => {
                sprites.insert(key.clone(), image.to_rgba8());
            }
            Err(e) => failures.push(format!("{} ({})", path.display(), e)),
        }
        sources.insert(key, path);
    }

    if !failures.is_empty() {
        return Err(PokedexError::asset_load(
            dir,
            format!("bad sprite(s): {}", failures.join(", ")),
        ));
    }
    if sprites.is_empty() {
        return Err(PokedexError::asset_load(dir, "no sprite images found"));
    }

    Ok(sprites)
}

pub fn load_attributes(path: &Path, schema: &AttributeSchema) -> Result<AttributeTable> {
    let table = AttributeTable::load(path, schema)?;
    if table.is_empty() {
        return Err(PokedexError::asset_load(path, "no attribute rows"));
    }
    Ok(table)
}
