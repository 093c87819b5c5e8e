//! Chart Builder
//!
//! Reshapes the wide roster (one column per subject) into long
//! `(category, value)` series and turns them into bar chart descriptions.
//!
//! ```text
//! Student mode:  one student  -> [(Math, m), (English, e), ...]
//! Subject mode:  one subject  -> [(Name_0, v0), (Name_1, v1), ...]
//! ```
//!
//! Values are never rounded or aggregated.

use serde::Serialize;
use std::collections::HashMap;

use super::theme::{ChartTheme, PALETTE_SET1, PALETTE_SET2};
use crate::roster::{format_number, ClassRoster, Subject};

/// One `(category, value)` pair of a long-form series
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesPoint {
    pub category: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            value,
        }
    }
}

/// One bar of a rendered chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Bar {
    pub category: String,
    pub value: f64,
    /// Text printed on the bar
    pub label: String,
    pub color: String,
}

/// A complete bar chart description, ready for SVG or JSON output
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub bars: Vec<Bar>,
    pub layout: ChartTheme,
}

impl BarChart {
    /// Build a chart from a series, colouring each distinct category
    pub fn from_series(
        title: impl Into<String>,
        x_title: impl Into<String>,
        y_title: impl Into<String>,
        series: Vec<SeriesPoint>,
        palette: &[&str],
        layout: ChartTheme,
    ) -> Self {
        let colors = bar_colors(&series, palette);

        let bars = series
            .into_iter()
            .zip(colors)
            .map(|(point, color)| Bar {
                label: format_number(point.value),
                category: point.category,
                value: point.value,
                color,
            })
            .collect();

        Self {
            title: title.into(),
            x_title: x_title.into(),
            y_title: y_title.into(),
            bars,
            layout,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Largest bar value, or `None` for an empty chart
    pub fn max_value(&self) -> Option<f64> {
        self.bars
            .iter()
            .map(|b| b.value)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
    }
}

/// Colour for each point, one per distinct category in first-appearance order
///
/// The palette cycles once exhausted; repeated categories share a colour.
fn bar_colors(series: &[SeriesPoint], palette: &[&str]) -> Vec<String> {
    let mut assigned: HashMap<&str, usize> = HashMap::new();
    series
        .iter()
        .map(|point| {
            let next = assigned.len();
            let slot = *assigned.entry(point.category.as_str()).or_insert(next);
            palette[slot % palette.len()].to_string()
        })
        .collect()
}

/// Marks of every record named `name`, one point per subject in fixed order
///
/// An unknown name yields an empty series.
pub fn student_series(roster: &ClassRoster, name: &str) -> Vec<SeriesPoint> {
    let matching: Vec<_> = roster
        .students()
        .iter()
        .filter(|s| s.name == name)
        .collect();

    Subject::ALL
        .iter()
        .flat_map(|subject| {
            matching
                .iter()
                .map(move |s| SeriesPoint::new(subject.column(), s.scores.get(*subject)))
        })
        .collect()
}

/// Marks of every student in one subject, in roster order
pub fn subject_series(roster: &ClassRoster, subject: Subject) -> Vec<SeriesPoint> {
    roster
        .students()
        .iter()
        .map(|s| SeriesPoint::new(s.name.clone(), s.scores.get(subject)))
        .collect()
}

/// "Performance of {name}" chart
pub fn student_chart(roster: &ClassRoster, name: &str, layout: &ChartTheme) -> BarChart {
    BarChart::from_series(
        format!("Performance of {}", name),
        "Subjects",
        "Marks",
        student_series(roster, name),
        &PALETTE_SET1,
        layout.clone(),
    )
}

/// "{subject} Performance" chart
pub fn subject_chart(roster: &ClassRoster, subject: Subject, layout: &ChartTheme) -> BarChart {
    BarChart::from_series(
        format!("{} Performance", subject),
        "Students",
        "Marks",
        subject_series(roster, subject),
        &PALETTE_SET2,
        layout.clone(),
    )
}
