#![warn(clippy::pedantic)]

mod export;
pub mod global;
pub mod ui;

use anyhow::Result as AnyResult;

fn run_window() -> AnyResult<()> {
    let preferences = global::settings::Preferences::get();
    // Write out the defaults so there's a file to edit, but never clobber a file the user broke.
    let missing = global::settings::Preferences::path().is_some_and(|path| !path.exists());
    if preferences.did_fail_to_load() && missing {
        if let Err(e) = preferences.save() {
            log::warn!("Failed to save settings:\n{e:?}");
        };
    }

    // Stand-in for the brush engine's color, which would be shared with the selector.
    let brush_color = huewheel_core::SharedColor::new(huewheel_core::Hsv::new(0.0, 1.0, 1.0));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Color")
            .with_inner_size([280.0, 160.0]),
        ..Default::default()
    };
    eframe::run_native(
        env!("CARGO_PKG_NAME"),
        options,
        Box::new(move |_| Box::new(ui::ColorWindow::new(brush_color, &preferences.settings))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

fn main() -> AnyResult<()> {
    let has_term = std::io::IsTerminal::is_terminal(&std::io::stdin());
    // Log to a terminal, if available. Else, log to "log.out" in the working directory.
    if has_term {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        let _ = simple_logging::log_to_file("log.out", log::LevelFilter::Debug);
    }

    match export::parse_args(std::env::args().skip(1))? {
        export::Command::Export { path, color } => export::export_png(&path, color),
        export::Command::Run => run_window(),
    }
}
