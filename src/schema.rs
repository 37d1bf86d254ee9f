use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle stage of a tracked application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Applied,
    Pending,
    Interviewing,
    Offer,
    Rejected,
    Ghosted,
}

impl Status {
    /// Every status, in the order the UI lists them.
    pub const ALL: [Status; 6] = [
        Status::Applied,
        Status::Pending,
        Status::Interviewing,
        Status::Offer,
        Status::Rejected,
        Status::Ghosted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Applied => "Applied",
            Status::Pending => "Pending",
            Status::Interviewing => "Interviewing",
            Status::Offer => "Offer",
            Status::Rejected => "Rejected",
            Status::Ghosted => "Ghosted",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("unknown status: {s}"))
    }
}

/// Resume attachment, stored fully inline as a base64 data URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeFile {
    pub name: String,
    pub data: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// One tracked job application.
///
/// Field names on disk stay camelCase so exports from older builds of the
/// tracker load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub company_name: String,
    pub role: String,
    pub location: String,
    pub status: Status,
    pub resume_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_file: Option<ResumeFile>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub job_description: String,
    /// Display string set once at creation, never recomputed.
    pub date_applied: String,
}

/// Aggregate counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub interviews: usize,
    pub offers: usize,
    pub pending: usize,
    pub rejected: usize,
    pub applied: usize,
}
