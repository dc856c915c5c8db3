//! Gantt Chart - Interactive viewer for batch schedules

use gantt_chart::gui::{native_options, GanttApp, WINDOW_TITLE};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut options = native_options();
    options.viewport = options
        .viewport
        .with_inner_size([1300.0, 600.0])
        .with_min_inner_size([900.0, 400.0]);

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(GanttApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start gantt viewer: {e}"))
}
