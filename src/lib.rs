//! jobtrack — local-first job application tracker.
//!
//! Applications live in one JSON slot under the user's data directory.
//! Pure selectors and a stats calculator read snapshots of the list; the
//! store owns the canonical in-memory copy and writes it back whole after
//! every mutation.

pub mod attach;
pub mod config;
pub mod date;
pub mod github;
pub mod schema;
pub mod selectors;
pub mod stats;
pub mod storage;
pub mod store;

pub use schema::{Application, DashboardStats, ResumeFile, Status};
pub use selectors::StatusFilter;
pub use store::ApplicationStore;
