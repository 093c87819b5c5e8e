//! # Classboard
//!
//! Class Dashboard - reads a spreadsheet of student records and renders it
//! as a visual report: profile cards for every student plus two selectable
//! bar charts (one student across subjects, one subject across students).
//!
//! ## Modules
//!
//! - [`roster`]: Spreadsheet/CSV loading into a `ClassRoster`
//! - [`report`]: Card grid, chart reshaping, and the pure render pass
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use classboard::config::Config;
//! use classboard::report::{render, render_html, SelectionParams};
//! use classboard::roster::{load_roster, Subject};
//!
//! let config = Config::default();
//! let roster = load_roster(&config.roster.path);
//!
//! let view = render(
//!     roster.as_ref(),
//!     &SelectionParams::subject(Subject::Math),
//!     &config.dashboard,
//!     &config.theme,
//! );
//! let page = render_html(&view, &config.theme);
//! println!("{}", page);
//! ```

pub mod api;
pub mod config;
pub mod report;
pub mod roster;

// Re-export top-level types for convenience
pub use roster::{
    load_roster, ClassHeader, ClassRoster, LoadError, LoadResult, Scores, StudentRecord, Subject,
};

pub use report::{
    render, render_html, BarChart, CardGrid, ChartMode, ChartSelection, DashboardView,
    SelectionParams, Theme,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{
    Config, ConfigError, DashboardConfig, LoggingConfig, RosterConfig, ServerConfig,
};
