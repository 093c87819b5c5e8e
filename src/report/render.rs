//! Render pass
//!
//! `render` is the whole dashboard as a pure function: the outcome of
//! loading the roster plus the current selection in, a view description out.
//! Nothing here touches the filesystem or keeps state between calls.

use serde::Serialize;

use super::cards::{build_card_grid, CardGrid};
use super::chart::{student_chart, subject_chart, BarChart};
use super::selection::{entity_options, resolve, ChartMode, ChartSelection, SelectionParams};
use super::theme::Theme;
use crate::config::DashboardConfig;
use crate::roster::{ClassHeader, ClassRoster, LoadError};

/// Everything one page shows
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub page_title: String,
    pub sidebar_title: String,
    pub content: ViewContent,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewContent {
    /// The roster could not be loaded; nothing else is rendered
    LoadFailure { message: String },
    Ready(Box<Dashboard>),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    pub header: ClassHeader,
    pub cards: CardGrid,
    pub controls: ChartControls,
    pub chart: BarChart,
}

/// State of the two chart selectors
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChartControls {
    pub mode: ChartMode,
    pub mode_options: Vec<ModeOption>,
    pub entity_label: String,
    pub entity_param: String,
    pub entity_options: Vec<String>,
    pub selected_entity: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ModeOption {
    pub value: String,
    pub label: String,
}

impl DashboardView {
    pub fn is_failure(&self) -> bool {
        matches!(self.content, ViewContent::LoadFailure { .. })
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match &self.content {
            ViewContent::Ready(dashboard) => Some(dashboard.as_ref()),
            ViewContent::LoadFailure { .. } => None,
        }
    }
}

/// Message shown in place of the dashboard when loading fails
pub fn load_failure_message(error: &LoadError) -> String {
    format!("Error loading spreadsheet: {}", error)
}

/// One render pass
pub fn render(
    roster: Result<&ClassRoster, &LoadError>,
    params: &SelectionParams,
    settings: &DashboardConfig,
    theme: &Theme,
) -> DashboardView {
    let content = match roster {
        Err(error) => ViewContent::LoadFailure {
            message: load_failure_message(error),
        },
        Ok(roster) => match roster.class_header() {
            Some(header) => ViewContent::Ready(Box::new(build_dashboard(
                roster, header, params, settings, theme,
            ))),
            None => ViewContent::LoadFailure {
                message: load_failure_message(&LoadError::EmptyRoster),
            },
        },
    };

    DashboardView {
        page_title: settings.page_title.clone(),
        sidebar_title: settings.sidebar_title.clone(),
        content,
    }
}

/// Chart for an already resolved selection
pub fn build_chart(roster: &ClassRoster, selection: &ChartSelection, theme: &Theme) -> BarChart {
    match selection {
        ChartSelection::Student(name) => student_chart(roster, name, &theme.chart),
        ChartSelection::Subject(subject) => subject_chart(roster, *subject, &theme.chart),
    }
}

fn build_dashboard(
    roster: &ClassRoster,
    header: ClassHeader,
    params: &SelectionParams,
    settings: &DashboardConfig,
    theme: &Theme,
) -> Dashboard {
    let selection = resolve(roster, params);
    let mode = selection.mode();

    let chart = build_chart(roster, &selection, theme);

    let controls = ChartControls {
        mode,
        mode_options: ChartMode::ALL
            .iter()
            .map(|m| ModeOption {
                value: m.as_param().to_string(),
                label: m.label().to_string(),
            })
            .collect(),
        entity_label: mode.entity_label().to_string(),
        entity_param: mode.entity_param().to_string(),
        entity_options: entity_options(roster, mode),
        selected_entity: selection.entity(),
    };

    Dashboard {
        header,
        cards: build_card_grid(roster, settings.card_columns),
        controls,
        chart,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{StudentRecord, Subject};

    fn roster() -> ClassRoster {
        ClassRoster::new(vec![
            StudentRecord::new("Asha", "1")
                .class("7", "A", "Mrs. Kulkarni")
                .scores([80.0, 75.0, 90.0, 60.0, 70.0]),
            StudentRecord::new("Ravi", "2")
                .class("8", "B", "Mr. Patil")
                .scores([55.0, 65.0, 45.0, 72.0, 81.0]),
            StudentRecord::new("Meera", "3")
                .class("7", "A", "Mrs. Kulkarni")
                .scores([90.0, 88.0, 92.0, 85.0, 79.0]),
        ])
    }

    fn render_ok(params: &SelectionParams) -> DashboardView {
        let roster = roster();
        render(Ok(&roster), params, &DashboardConfig::default(), &Theme::default())
    }

    #[test]
    fn test_header_from_first_row() {
        let view = render_ok(&SelectionParams::default());
        let dashboard = view.dashboard().unwrap();

        assert_eq!(view.page_title, "Class Dashboard");
        assert_eq!(view.sidebar_title, "Class Details");
        assert_eq!(dashboard.header.grade, "7");
        assert_eq!(dashboard.header.division, "A");
        assert_eq!(dashboard.header.class_teacher, "Mrs. Kulkarni");
    }

    #[test]
    fn test_student_mode() {
        let view = render_ok(&SelectionParams::student("Asha"));
        let dashboard = view.dashboard().unwrap();

        assert_eq!(dashboard.chart.title, "Performance of Asha");
        assert_eq!(dashboard.controls.entity_label, "Select Student");
        assert_eq!(dashboard.controls.entity_options, vec!["Asha", "Ravi", "Meera"]);
        assert_eq!(dashboard.controls.selected_entity, "Asha");
        assert_eq!(dashboard.cards.cards().count(), 3);
    }

    #[test]
    fn test_subject_mode() {
        let view = render_ok(&SelectionParams::subject(Subject::Math));
        let dashboard = view.dashboard().unwrap();

        assert_eq!(dashboard.chart.title, "Math Performance");
        let pairs: Vec<_> = dashboard
            .chart
            .bars
            .iter()
            .map(|b| (b.category.as_str(), b.value))
            .collect();
        assert_eq!(pairs, vec![("Asha", 80.0), ("Ravi", 55.0), ("Meera", 90.0)]);
        assert_eq!(dashboard.controls.entity_param, "subject");
    }

    #[test]
    fn test_load_failure_skips_everything() {
        let error = LoadError::MissingColumns(vec!["Math".to_string()]);
        let view = render(
            Err(&error),
            &SelectionParams::default(),
            &DashboardConfig::default(),
            &Theme::default(),
        );

        assert!(view.is_failure());
        assert!(view.dashboard().is_none());
        match view.content {
            ViewContent::LoadFailure { message } => {
                assert_eq!(
                    message,
                    "Error loading spreadsheet: missing required columns: Math"
                );
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let params = SelectionParams::subject(Subject::History);
        assert_eq!(render_ok(&params), render_ok(&params));
    }
}
