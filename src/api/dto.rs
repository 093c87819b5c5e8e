//! Data Transfer Objects
//!
//! Response types for the JSON endpoints.

use serde::Serialize;

use crate::roster::{ClassHeader, StudentRecord};

// ============================================
// ROSTER DTOs
// ============================================

/// Roster listing response
#[derive(Debug, Serialize)]
pub struct RosterResponse {
    /// Class details from the first row
    pub class: ClassHeader,
    /// Number of student rows
    pub total: usize,
    /// Student rows in file order
    pub students: Vec<StudentRecord>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, unhealthy
    pub status: String,
    /// Roster status: ok, error
    pub roster: String,
    /// Student rows in the roster, when it loads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub students: Option<usize>,
    /// Load failure, when it does not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
