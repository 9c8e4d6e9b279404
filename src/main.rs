mod app;
mod catalog;
mod export;
mod gate;
mod session;
mod submission;
mod theme;

use app::AvaluacioApp;
use eframe::egui;
use submission::store::{self, SubmissionStore};
use theme::Theme;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (submissions, load_warning) = SubmissionStore::open(store::default_path());
    let app = AvaluacioApp::new(submissions, load_warning);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([820.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Autoavaluació",
        native_options,
        Box::new(move |creation_context| {
            Theme::default().apply_visuals(&creation_context.egui_ctx);
            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}
