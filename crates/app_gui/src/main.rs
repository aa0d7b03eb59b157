mod app;

use app::UiApp;
use eframe::{NativeOptions, egui};

fn main() {
    tracing_subscriber::fmt::init();
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    if let Err(e) = eframe::run_native(
        "FloraView — flower classification",
        options,
        Box::new(|cc| {
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(Box::new(UiApp::new(cc)))
        }),
    ) {
        eprintln!("Application stopped with error: {e}");
    }
}
