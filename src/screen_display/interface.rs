use crate::pokedex::outcome::Outcome;
use std::error::Error;

/// Where the result of an identification ends up in front of the user.
pub trait ScreenDisplay {
    /// Shows the caption and, when there is one, the image of `outcome`.
    fn show(&mut self, outcome: &Outcome) -> Result<(), Box<dyn Error + Send + Sync>>;
}
