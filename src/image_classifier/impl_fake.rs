use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::library::logger::interface::Logger;
use image::RgbImage;
use rand::distr::{Distribution, Uniform};
use std::sync::Arc;

enum Mode {
    Random(Vec<String>),
    #[cfg(test)]
    Fixed(Classification),
}

/// Stand-in for a real model: either always answers the same thing or picks
/// a random known class with a random confidence.
pub struct ImageClassifierFake {
    mode: Mode,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierFake {
    pub fn new(labels: Vec<String>, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            mode: Mode::Random(labels),
            logger: logger.with_namespace("classifier").with_namespace("fake"),
        }
    }

    #[cfg(test)]
    pub fn fixed(label: &str, confidence: f32, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            mode: Mode::Fixed(Classification {
                label: label.to_string(),
                confidence,
            }),
            logger: logger.with_namespace("classifier").with_namespace("fake"),
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(
        &self,
        image: &RgbImage,
    ) -> Result<Classification, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!(
            "classifying {}x{} image",
            image.width(),
            image.height()
        ))?;

        let classification = match &self.mode {
            #[cfg(test)]
            Mode::Fixed(classification) => classification.clone(),
            Mode::Random(labels) => {
                if labels.is_empty() {
                    return Err("no labels to pick from".into());
                }
                let mut rng = rand::rng();
                let index_dist = Uniform::new(0, labels.len())?;
                let confidence_dist = Uniform::new_inclusive(0.0f32, 100.0)?;
                Classification {
                    label: labels[index_dist.sample(&mut rng)].clone(),
                    confidence: confidence_dist.sample(&mut rng),
                }
            }
        };

        self.logger.info(&format!(
            "{} ({:.1}%)",
            classification.label, classification.confidence
        ))?;
        Ok(classification)
    }
}
