use crate::pokedex::outcome::Outcome;
use crate::screen_display::interface::ScreenDisplay;
use std::error::Error;

#[derive(Default)]
pub struct ScreenDisplayFake {
    pub shown: Vec<Outcome>,
}

impl ScreenDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captions(&self) -> Vec<String> {
        self.shown.iter().map(Outcome::caption).collect()
    }
}

impl ScreenDisplay for ScreenDisplayFake {
    fn show(&mut self, outcome: &Outcome) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.shown.push(outcome.clone());
        Ok(())
    }
}
