//! Showdesk entry point

mod app;
mod demo;
mod page_shell;

use anyhow::Result;

use app::ShowdeskApp;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Showdesk"),
        default_theme: eframe::Theme::Dark,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "Showdesk",
        options,
        Box::new(move |cc| Box::new(ShowdeskApp::new(cc, runtime))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run application: {e}"))?;

    Ok(())
}
