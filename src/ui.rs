mod app;
mod card;
mod carousel;
mod layout;
mod repaint;
mod textures;
mod worker;


use eframe::egui;

use crate::runtime::AppContext;

use app::GalleryUiApp;

pub fn run(app: AppContext) -> Result<(), String> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("AI Gallery")
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "AI Gallery",
        options,
        Box::new(move |cc| Ok(Box::new(GalleryUiApp::new(cc, app)))),
    )
    .map_err(|error| error.to_string())
}
