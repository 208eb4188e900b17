use crate::library::logger::interface::Logger;
use crate::library::raster;
use crate::pokedex::outcome::Outcome;
use crate::screen_display::interface::ScreenDisplay;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

/// Logs the caption and writes the image next to it as a PNG file.
pub struct ScreenDisplayConsole {
    output_path: PathBuf,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ScreenDisplayConsole {
    pub fn new(output_path: PathBuf, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            output_path,
            logger: logger.with_namespace("display").with_namespace("console"),
        }
    }
}

impl ScreenDisplay for ScreenDisplayConsole {
    fn show(&mut self, outcome: &Outcome) -> Result<(), Box<dyn Error + Send + Sync>> {
        match outcome {
            Outcome::Failed { message } => {
                self.logger.error(message)?;
                return Ok(());
            }
            _ => self.logger.info(&outcome.caption())?,
        }

        if let Some(image) = outcome.image() {
            raster::save_png(image, &self.output_path)?;
            self.logger.info(&format!(
                "wrote {}x{} image to {}",
                image.width(),
                image.height(),
                self.output_path.display()
            ))?;
        }
        Ok(())
    }
}
