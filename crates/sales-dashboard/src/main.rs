mod bootstrap;
mod report;

use std::sync::Arc;

use anyhow::{Context, Result};
use dashboard_core::settings::Settings;
use dashboard_data::reader::load_dataset;
use dashboard_runtime::session::DashboardSession;
use dashboard_ui::app::App;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::ensure_directories()?;

    // The TUI owns the terminal, so interactive runs always log to a file.
    let log_file = match (&settings.log_file, settings.is_interactive()) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(bootstrap::default_log_file()),
        (None, false) => None,
    };
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("Sales Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("View: {}, Theme: {}", settings.view, settings.theme);

    let data_file = bootstrap::discover_data_file(settings.data_file.as_deref())?;
    let dataset = load_dataset(&data_file)
        .map_err(|e| {
            tracing::error!(data_load = e.is_data_load(), "{}", e);
            e
        })
        .with_context(|| format!("failed to load {}", data_file.display()))?;
    tracing::info!(
        records = dataset.len(),
        "Loaded dataset from {}",
        data_file.display()
    );

    let source = data_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| data_file.display().to_string());

    let session = DashboardSession::new(Arc::new(dataset), settings.initial_selection());

    match settings.view.as_str() {
        "dashboard" => {
            let app = App::new(session, &settings.theme, source);

            // Raw mode delivers Ctrl+C as a key press; the OS signal covers
            // the moments before raw mode is enabled.
            tokio::select! {
                result = app.run() => result?,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down");
                }
            }
        }
        "summary" => {
            print!("{}", report::render_summary(&session.snapshot(), &source));
        }
        "json" => {
            println!("{}", report::render_json(&session.snapshot())?);
        }
        unknown => anyhow::bail!("Unknown view mode: {}", unknown),
    }

    Ok(())
}
