//! Roster Loader
//!
//! Reads the class spreadsheet into a [`ClassRoster`]. Spreadsheet formats
//! (xlsx, xlsm, xlsb, xls, ods) go through calamine, `.csv` through the csv
//! crate. Both are flattened into a header row plus text cells and then
//! mapped onto the required columns by exact header name.

use super::error::{LoadError, LoadResult};
use super::types::{ClassRoster, Scores, StudentRecord, Subject};
use calamine::{open_workbook_auto, Data, Reader};
use std::collections::HashMap;
use std::path::Path;

pub const COL_NAME: &str = "Name";
pub const COL_ROLL_NO: &str = "Roll No";
pub const COL_GRADE: &str = "Grade";
pub const COL_DIVISION: &str = "Division";
pub const COL_CLASS_TEACHER: &str = "Class Teacher";
pub const COL_PROFILE_PICTURE: &str = "Profile Picture URL";

/// Every column the roster needs, matched case- and space-sensitively
pub const REQUIRED_COLUMNS: [&str; 11] = [
    COL_NAME,
    COL_ROLL_NO,
    COL_GRADE,
    COL_DIVISION,
    COL_CLASS_TEACHER,
    COL_PROFILE_PICTURE,
    "Math",
    "English",
    "Science",
    "History",
    "Marathi",
];

/// Header row plus every data row as text
#[derive(Debug, Default)]
struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Load the roster at `path`, picking the parser from the extension
pub fn load_roster(path: &Path) -> LoadResult<ClassRoster> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let table = match extension.as_str() {
        "csv" => read_csv(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path)?,
        other => {
            return Err(LoadError::UnsupportedFormat(if other.is_empty() {
                path.display().to_string()
            } else {
                format!(".{}", other)
            }))
        }
    };

    let roster = build_roster(table)?;
    tracing::info!(path = %path.display(), students = roster.len(), "Loaded roster");
    Ok(roster)
}

/// Parse a roster from CSV text (useful for testing)
pub fn load_roster_str(csv_data: &str) -> LoadResult<ClassRoster> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());
    build_roster(collect_csv(reader)?)
}

fn read_csv(path: &Path) -> LoadResult<RawTable> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    collect_csv(reader)
}

fn collect_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> LoadResult<RawTable> {
    let headers = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

fn read_workbook(path: &Path) -> LoadResult<RawTable> {
    if !path.exists() {
        return Err(LoadError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        });
    }

    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::NoWorksheet)??;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>());

    let headers = rows.next().unwrap_or_default();
    let rows = rows
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .collect();

    Ok(RawTable { headers, rows })
}

/// Render a spreadsheet cell as the text a reader would see
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Whole numbers print without a fractional part ("12", not "12.0")
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn build_roster(table: RawTable) -> LoadResult<ClassRoster> {
    // A repeated header resolves to its first column
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (idx, header) in table.headers.iter().enumerate() {
        index.entry(header.as_str()).or_insert(idx);
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !index.contains_key(*column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    let text = |row: &[String], column: &str| -> String {
        row.get(index[column]).cloned().unwrap_or_default()
    };

    let mut students = Vec::with_capacity(table.rows.len());
    for (offset, row) in table.rows.iter().enumerate() {
        // Spreadsheet row number, counting the header as row 1
        let line = offset + 2;

        let mut marks = [0.0; 5];
        for (slot, subject) in marks.iter_mut().zip(Subject::ALL) {
            let raw = text(row, subject.column());
            *slot = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| LoadError::InvalidScore {
                    row: line,
                    column: subject.column().to_string(),
                    value: raw.clone(),
                })?;
        }

        let picture = text(row, COL_PROFILE_PICTURE).trim().to_string();

        students.push(StudentRecord {
            name: text(row, COL_NAME),
            roll_no: text(row, COL_ROLL_NO),
            grade: text(row, COL_GRADE),
            division: text(row, COL_DIVISION),
            class_teacher: text(row, COL_CLASS_TEACHER),
            profile_picture_url: (!picture.is_empty()).then_some(picture),
            scores: Scores::from_ordered(marks),
        });
    }

    if students.is_empty() {
        return Err(LoadError::EmptyRoster);
    }

    let roster = ClassRoster::new(students);

    let duplicates = roster.duplicate_names();
    if !duplicates.is_empty() {
        tracing::warn!(names = ?duplicates, "Roster contains duplicate student names");
    }
    if !roster.has_consistent_class() {
        tracing::warn!("Roster rows disagree on grade, division or class teacher; using row 0");
    }

    Ok(roster)
}
