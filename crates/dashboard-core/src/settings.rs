use clap::Parser;
use std::path::PathBuf;

use crate::models::Selection;

/// Default file name of the sales dataset.
pub const DEFAULT_DATA_FILE: &str = "Superstore_Sales_utf8.csv";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive sales dashboard: category and sub-category drill-down with
/// monthly trends and profit-margin metrics
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sales-dashboard",
    about = "Interactive sales dashboard with category drill-down and profit metrics",
    version
)]
pub struct Settings {
    /// Path to the sales CSV file (searched in ./ and ./data/ when omitted)
    #[arg(long, env = "SALES_DASHBOARD_DATA")]
    pub data_file: Option<PathBuf>,

    /// View mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "summary", "json"])]
    pub view: String,

    /// Initially selected category
    #[arg(long)]
    pub category: Option<String>,

    /// Initially selected sub-category (repeat for several)
    #[arg(long = "sub-category")]
    pub sub_categories: Vec<String>,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply derived overrides.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os().collect())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args(args: Vec<std::ffi::OsString>) -> Self {
        Self::resolve(Settings::parse_from(args))
    }

    /// Apply the `--debug` flag.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// `true` when the interactive TUI should run.
    pub fn is_interactive(&self) -> bool {
        self.view == "dashboard"
    }

    /// Selection requested on the command line, if any category was given.
    ///
    /// Sub-categories without a category are ignored.
    pub fn initial_selection(&self) -> Option<Selection> {
        let category = self.category.as_ref()?;
        Some(Selection::new(category.clone(), self.sub_categories.clone()))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
