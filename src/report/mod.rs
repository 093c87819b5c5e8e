//! Dashboard Report
//!
//! Everything between a loaded roster and the bytes sent to the browser:
//!
//! - **selection**: chart mode and the dependent student/subject choice
//! - **cards**: student card grid
//! - **chart**: wide-to-long reshape and bar chart descriptions
//! - **render**: the pure `render(roster, selection) -> DashboardView` pass
//! - **html** / **svg**: page and chart markup
//! - **theme**: colours, spacing and fonts
//!
//! # Flow
//!
//! ```text
//! load_roster ──► render ──► DashboardView ──► render_html ──► page
//!                   ▲                       └─► JSON (API)
//!           SelectionParams
//! ```

pub mod cards;
pub mod chart;
pub mod html;
pub mod render;
pub mod selection;
pub mod svg;
pub mod theme;

pub use cards::{build_card_grid, CardGrid, CardImage, CardRow, StudentCard, DEFAULT_CARD_COLUMNS};
pub use chart::{student_chart, student_series, subject_chart, subject_series, Bar, BarChart, SeriesPoint};
pub use html::render_html;
pub use render::{build_chart, render, ChartControls, Dashboard, DashboardView, ViewContent};
pub use selection::{ChartMode, ChartSelection, SelectionParams};
pub use svg::render_svg;
pub use theme::{ChartTheme, Theme};
