use image::RgbImage;

/// Top prediction for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    /// Percent, in `[0, 100]`.
    pub confidence: f32,
}

pub trait ImageClassifier: Send + Sync {
    fn classify(
        &self,
        image: &RgbImage,
    ) -> Result<Classification, Box<dyn std::error::Error + Send + Sync>>;
}
