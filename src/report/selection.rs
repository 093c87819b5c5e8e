//! Chart selection
//!
//! Turns the raw request parameters (mode plus a dependent student or
//! subject choice) into a concrete [`ChartSelection`] for one render pass.

use serde::{Deserialize, Serialize};

use crate::roster::{ClassRoster, Subject};

/// Which chart the user asked for
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    #[default]
    #[serde(alias = "Student Performance")]
    Student,
    #[serde(alias = "Subject Performance")]
    Subject,
}

impl ChartMode {
    pub const ALL: [ChartMode; 2] = [ChartMode::Student, ChartMode::Subject];

    /// Label shown in the mode selector
    pub fn label(&self) -> &'static str {
        match self {
            ChartMode::Student => "Student Performance",
            ChartMode::Subject => "Subject Performance",
        }
    }

    /// Value sent back in the `mode` query parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            ChartMode::Student => "student",
            ChartMode::Subject => "subject",
        }
    }

    /// Label of the dependent entity selector
    pub fn entity_label(&self) -> &'static str {
        match self {
            ChartMode::Student => "Select Student",
            ChartMode::Subject => "Select Subject",
        }
    }

    /// Query parameter holding the dependent entity
    pub fn entity_param(&self) -> &'static str {
        match self {
            ChartMode::Student => "student",
            ChartMode::Subject => "subject",
        }
    }
}

/// Raw selection as it arrives from a request
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SelectionParams {
    #[serde(default)]
    pub mode: Option<ChartMode>,
    #[serde(default)]
    pub student: Option<String>,
    #[serde(default)]
    pub subject: Option<Subject>,
}

impl SelectionParams {
    pub fn student(name: impl Into<String>) -> Self {
        Self {
            mode: Some(ChartMode::Student),
            student: Some(name.into()),
            subject: None,
        }
    }

    pub fn subject(subject: Subject) -> Self {
        Self {
            mode: Some(ChartMode::Subject),
            student: None,
            subject: Some(subject),
        }
    }
}

/// A resolved choice for one render pass
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "mode", content = "entity", rename_all = "lowercase")]
pub enum ChartSelection {
    /// Chart one student's marks; the name may match nobody
    Student(String),
    Subject(Subject),
}

impl ChartSelection {
    pub fn mode(&self) -> ChartMode {
        match self {
            ChartSelection::Student(_) => ChartMode::Student,
            ChartSelection::Subject(_) => ChartMode::Subject,
        }
    }

    /// The selected student name or subject, as displayed
    pub fn entity(&self) -> String {
        match self {
            ChartSelection::Student(name) => name.clone(),
            ChartSelection::Subject(subject) => subject.to_string(),
        }
    }
}

/// Options of the dependent selector for `mode`
pub fn entity_options(roster: &ClassRoster, mode: ChartMode) -> Vec<String> {
    match mode {
        ChartMode::Student => roster
            .distinct_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        ChartMode::Subject => Subject::ALL.iter().map(|s| s.to_string()).collect(),
    }
}

/// Resolve request parameters against the roster
///
/// A missing entity falls back to the first option; the entity of the
/// other mode is ignored.
pub fn resolve(roster: &ClassRoster, params: &SelectionParams) -> ChartSelection {
    match params.mode.unwrap_or_default() {
        ChartMode::Student => {
            let name = params
                .student
                .clone()
                .or_else(|| roster.distinct_names().first().map(|n| n.to_string()))
                .unwrap_or_default();
            ChartSelection::Student(name)
        }
        ChartMode::Subject => ChartSelection::Subject(params.subject.unwrap_or(Subject::ALL[0])),
    }
}
