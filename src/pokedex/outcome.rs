use image::RgbaImage;

pub const NOT_RECOGNIZED_MESSAGE: &str = "Pokemon not recognized";
pub const FAILURE_MESSAGE: &str = "Couldn't process this image";

/// What one upload ends up showing.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Recognized {
        label: String,
        confidence: f32,
        screen: RgbaImage,
    },
    NotRecognized {
        message: String,
        image: RgbaImage,
    },
    /// Something went wrong; there is deliberately no image to show.
    Failed { message: String },
}

impl Outcome {
    pub fn caption(&self) -> String {
        match self {
            Outcome::Recognized {
                label, confidence, ..
            } => format!("{} ({:.1}%)", label, confidence),
            Outcome::NotRecognized { message, .. } | Outcome::Failed { message } => {
                message.clone()
            }
        }
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        match self {
            Outcome::Recognized { screen, .. } => Some(screen),
            Outcome::NotRecognized { image, .. } => Some(image),
            Outcome::Failed { .. } => None,
        }
    }
}
