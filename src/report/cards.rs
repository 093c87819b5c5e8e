//! Student card grid
//!
//! Splits the roster into rows of a fixed column count. Each row always has
//! `columns` cells; cells past the last student stay empty.

use serde::Serialize;

use crate::roster::{ClassRoster, StudentRecord};

/// Default number of cards per row
pub const DEFAULT_CARD_COLUMNS: usize = 4;

/// Text shown in place of a missing profile picture
pub const NO_IMAGE_PLACEHOLDER: &str = "No Image Available";

/// Picture slot of a card
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CardImage {
    Url(String),
    Placeholder(String),
}

/// One student card
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StudentCard {
    pub image: CardImage,
    pub name: String,
    pub roll_no: String,
    pub grade: String,
    pub division: String,
}

impl StudentCard {
    pub fn from_record(record: &StudentRecord) -> Self {
        let image = match &record.profile_picture_url {
            Some(url) => CardImage::Url(url.clone()),
            None => CardImage::Placeholder(NO_IMAGE_PLACEHOLDER.to_string()),
        };

        Self {
            image,
            name: record.name.clone(),
            roll_no: record.roll_no.clone(),
            grade: record.grade.clone(),
            division: record.division.clone(),
        }
    }
}

/// One grid row; `None` marks an empty trailing cell
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CardRow {
    pub cells: Vec<Option<StudentCard>>,
}

impl CardRow {
    /// Number of occupied cells
    pub fn card_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CardGrid {
    pub columns: usize,
    pub rows: Vec<CardRow>,
}

impl CardGrid {
    /// Cards in roster order, skipping empty cells
    pub fn cards(&self) -> impl Iterator<Item = &StudentCard> {
        self.rows.iter().flat_map(|row| row.cells.iter().flatten())
    }
}

/// Lay the roster out as rows of `columns` cards
///
/// A column count of zero is treated as one.
pub fn build_card_grid(roster: &ClassRoster, columns: usize) -> CardGrid {
    let columns = columns.max(1);

    let rows = roster
        .students()
        .chunks(columns)
        .map(|chunk| {
            let mut cells: Vec<Option<StudentCard>> =
                chunk.iter().map(|s| Some(StudentCard::from_record(s))).collect();
            cells.resize(columns, None);
            CardRow { cells }
        })
        .collect();

    CardGrid { columns, rows }
}
