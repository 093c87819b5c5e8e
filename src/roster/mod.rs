//! Class Roster
//!
//! The student table behind the dashboard:
//!
//! - **types**: `StudentRecord`, `ClassRoster`, `Subject`, `ClassHeader`
//! - **loader**: spreadsheet/CSV parsing and schema mapping
//! - **error**: `LoadError`
//!
//! A roster is loaded fresh for every render pass and dropped afterwards.
//!
//! # Example
//!
//! ```rust,no_run
//! use classboard::roster::{load_roster, Subject};
//! use std::path::Path;
//!
//! let roster = load_roster(Path::new("Student Dash-2.xlsx"))?;
//! for student in roster.students() {
//!     println!("{}: {}", student.name, student.scores.get(Subject::Math));
//! }
//! # Ok::<(), classboard::roster::LoadError>(())
//! ```

pub mod error;
pub mod loader;
pub mod types;

pub use error::{LoadError, LoadResult};
pub use loader::{format_number, load_roster, load_roster_str, REQUIRED_COLUMNS};
pub use types::{ClassHeader, ClassRoster, Scores, StudentRecord, Subject};
