//! Core data types for the class roster
//!
//! - `StudentRecord`: one row of the source spreadsheet
//! - `ClassRoster`: every row, in file order
//! - `Subject`: the fixed list of scored subjects
//! - `ClassHeader`: the class details shown above the cards

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A scored subject
///
/// The order of [`Subject::ALL`] is the order bars appear in on the
/// student performance chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Subject {
    #[serde(alias = "math")]
    Math,
    #[serde(alias = "english")]
    English,
    #[serde(alias = "science")]
    Science,
    #[serde(alias = "history")]
    History,
    #[serde(alias = "marathi")]
    Marathi,
}

impl Subject {
    /// Every subject, in display order
    pub const ALL: [Subject; 5] = [
        Subject::Math,
        Subject::English,
        Subject::Science,
        Subject::History,
        Subject::Marathi,
    ];

    /// Column header of this subject in the source spreadsheet
    pub fn column(&self) -> &'static str {
        match self {
            Subject::Math => "Math",
            Subject::English => "English",
            Subject::Science => "Science",
            Subject::History => "History",
            Subject::Marathi => "Marathi",
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

impl std::str::FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subject::ALL
            .iter()
            .copied()
            .find(|subject| subject.column().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown subject: {}", s))
    }
}

/// Marks for each subject, passed through exactly as read
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Scores {
    pub math: f64,
    pub english: f64,
    pub science: f64,
    pub history: f64,
    pub marathi: f64,
}

impl Scores {
    /// Build from marks given in [`Subject::ALL`] order
    pub fn from_ordered(marks: [f64; 5]) -> Self {
        let [math, english, science, history, marathi] = marks;
        Self {
            math,
            english,
            science,
            history,
            marathi,
        }
    }

    /// Marks for one subject
    pub fn get(&self, subject: Subject) -> f64 {
        match subject {
            Subject::Math => self.math,
            Subject::English => self.english,
            Subject::Science => self.science,
            Subject::History => self.history,
            Subject::Marathi => self.marathi,
        }
    }
}

/// One student row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentRecord {
    pub name: String,
    /// Display-only; never used as a lookup key
    pub roll_no: String,
    pub grade: String,
    pub division: String,
    pub class_teacher: String,
    /// `None` when the spreadsheet cell is empty
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    pub scores: Scores,
}

impl StudentRecord {
    /// Create a record with empty class details and zero marks
    pub fn new(name: impl Into<String>, roll_no: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roll_no: roll_no.into(),
            grade: String::new(),
            division: String::new(),
            class_teacher: String::new(),
            profile_picture_url: None,
            scores: Scores::default(),
        }
    }

    /// Builder: set grade, division and class teacher
    pub fn class(
        mut self,
        grade: impl Into<String>,
        division: impl Into<String>,
        class_teacher: impl Into<String>,
    ) -> Self {
        self.grade = grade.into();
        self.division = division.into();
        self.class_teacher = class_teacher.into();
        self
    }

    /// Builder: set the profile picture; an empty URL clears it
    pub fn picture(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.profile_picture_url = if url.trim().is_empty() {
            None
        } else {
            Some(url)
        };
        self
    }

    /// Builder: set marks in [`Subject::ALL`] order
    pub fn scores(mut self, marks: [f64; 5]) -> Self {
        self.scores = Scores::from_ordered(marks);
        self
    }
}

/// Grade, division and class teacher shown above the card grid
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClassHeader {
    pub grade: String,
    pub division: String,
    pub class_teacher: String,
}

/// Every student row of one spreadsheet, in file order
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ClassRoster {
    students: Vec<StudentRecord>,
}

impl ClassRoster {
    pub fn new(students: Vec<StudentRecord>) -> Self {
        Self { students }
    }

    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Class details from row 0, whatever the other rows say
    pub fn class_header(&self) -> Option<ClassHeader> {
        self.students.first().map(|first| ClassHeader {
            grade: first.grade.clone(),
            division: first.division.clone(),
            class_teacher: first.class_teacher.clone(),
        })
    }

    /// Distinct student names in first-occurrence order
    pub fn distinct_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.students
            .iter()
            .map(|s| s.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Names that appear on more than one row
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.students
            .iter()
            .map(|s| s.name.as_str())
            .filter(|name| !seen.insert(*name) && reported.insert(*name))
            .collect()
    }

    /// Whether every row agrees with row 0 on grade, division and teacher
    pub fn has_consistent_class(&self) -> bool {
        match self.students.first() {
            Some(first) => self.students.iter().all(|s| {
                s.grade == first.grade
                    && s.division == first.division
                    && s.class_teacher == first.class_teacher
            }),
            None => true,
        }
    }
}
