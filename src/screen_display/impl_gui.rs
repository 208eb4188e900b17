use crate::pokedex::outcome::Outcome;
use crate::screen_display::interface::ScreenDisplay;
use eframe::egui;
use std::error::Error;

struct ScreenWindow {
    caption: String,
    pixels: Option<egui::ColorImage>,
    texture: Option<egui::TextureHandle>,
}

impl eframe::App for ScreenWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.texture.is_none() {
            if let Some(pixels) = self.pixels.take() {
                self.texture =
                    Some(ctx.load_texture("pokedex-screen", pixels, egui::TextureOptions::LINEAR));
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.label(egui::RichText::new(&self.caption).size(22.0).strong());
                ui.add_space(12.0);

                if let Some(texture) = &self.texture {
                    let sized = egui::load::SizedTexture::new(texture.id(), texture.size_vec2());
                    ui.add(egui::Image::new(sized).shrink_to_fit());
                }
            });
        });
    }
}

/// Opens a native window with the caption above the image. `show` blocks
/// until the window is closed.
pub struct ScreenDisplayGui {
    title: String,
}

impl ScreenDisplayGui {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
        }
    }
}

impl ScreenDisplay for ScreenDisplayGui {
    fn show(&mut self, outcome: &Outcome) -> Result<(), Box<dyn Error + Send + Sync>> {
        let pixels = outcome.image().map(|image| {
            egui::ColorImage::from_rgba_unmultiplied(
                [image.width() as usize, image.height() as usize],
                image.as_raw(),
            )
        });
        let inner_size = pixels
            .as_ref()
            .map(|p| [p.size[0] as f32 + 40.0, p.size[1] as f32 + 100.0])
            .unwrap_or([480.0, 160.0]);

        let window = ScreenWindow {
            caption: outcome.caption(),
            pixels,
            texture: None,
        };
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size(inner_size),
            ..Default::default()
        };

        eframe::run_native(&self.title, options, Box::new(|_cc| Box::new(window)))
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}
