// Mood Calendar Application
// Main entry point

use mood_calendar::config::AppConfig;
use mood_calendar::ui_egui::MoodCalendarApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Mood Calendar");

    let config = AppConfig::load_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Mood Calendar")
            .with_inner_size([1180.0, 520.0])
            .with_min_inner_size([640.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Mood Calendar",
        options,
        Box::new(move |cc| {
            let app = MoodCalendarApp::new(cc, config)?;
            Ok(Box::new(app))
        }),
    )
}
