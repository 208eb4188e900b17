use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: PathBuf,
    /// Plain text, one class name per line, in output index order.
    pub labels_path: PathBuf,
    /// (width, height) the network expects.
    pub input_shape: (u32, u32),
    pub mean: [f32; 3],
    pub std: [f32; 3],
}

impl ModelConfig {
    /// MobileNet-style defaults: 224x224 input, ImageNet normalisation.
    pub fn new(onnx_model_path: PathBuf, labels_path: PathBuf) -> Self {
        Self {
            onnx_model_path,
            labels_path,
            input_shape: (224, 224),
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
        }
    }
}
