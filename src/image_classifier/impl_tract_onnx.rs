use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::tract::image::image_to_tensor;
use crate::library::logger::interface::Logger;
use image::RgbImage;
use std::sync::Arc;
use tract_onnx::prelude::*;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

pub struct ImageClassifierTractOnnx {
    model: Plan,
    labels: Vec<String>,
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTractOnnx {
    pub fn new(
        config: ModelConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let labels = parse_labels(&std::fs::read_to_string(&config.labels_path)?);
        if labels.is_empty() {
            return Err(format!("{} lists no labels", config.labels_path.display()).into());
        }

        let (width, height) = config.input_shape;
        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)?
            .with_input_fact(0, f32::fact([1, 3, height as usize, width as usize]).into())?
            .into_optimized()?
            .into_runnable()?;

        let logger = logger.with_namespace("classifier").with_namespace("onnx");
        logger.info(&format!(
            "loaded {} with {} labels",
            config.onnx_model_path.display(),
            labels.len()
        ))?;

        Ok(Self {
            model,
            labels,
            config,
            logger,
        })
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(
        &self,
        image: &RgbImage,
    ) -> Result<Classification, Box<dyn std::error::Error + Send + Sync>> {
        let input = image_to_tensor(image, &self.config)?;
        let outputs = self.model.run(tvec!(input.into_tvalue()))?;
        let scores: Vec<f32> = outputs[0].to_array_view::<f32>()?.iter().copied().collect();

        let (index, probability) =
            top_class(&probabilities(&scores)).ok_or("model returned no scores")?;
        let label = self
            .labels
            .get(index)
            .ok_or_else(|| format!("class index {} has no label", index))?;

        let classification = Classification {
            label: label.clone(),
            confidence: probability * 100.0,
        };
        self.logger.info(&format!(
            "{} ({:.1}%)",
            classification.label, classification.confidence
        ))?;
        Ok(classification)
    }
}

fn parse_labels(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Passes probability vectors through and softmaxes raw logits.
fn probabilities(scores: &[f32]) -> Vec<f32> {
    let sum: f32 = scores.iter().sum();
    let already_normalised =
        scores.iter().all(|s| (0.0..=1.0).contains(s)) && (sum - 1.0).abs() < 1e-3;
    if already_normalised {
        return scores.to_vec();
    }

    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.iter().map(|e| e / total).collect()
}

fn top_class(probabilities: &[f32]) -> Option<(usize, f32)> {
    probabilities
        .iter()
        .copied()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(&b.1))
}
