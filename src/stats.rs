//! Dashboard aggregates derived from the application list.

use crate::schema::{Application, DashboardStats, Status};
use crate::selectors;

pub fn calculate_stats(apps: &[Application]) -> DashboardStats {
    DashboardStats {
        total: apps.len(),
        interviews: selectors::by_status(apps, Status::Interviewing).len(),
        offers: selectors::by_status(apps, Status::Offer).len(),
        pending: selectors::by_status(apps, Status::Pending).len(),
        rejected: selectors::by_status(apps, Status::Rejected).len(),
        applied: selectors::by_status(apps, Status::Applied).len(),
    }
}

/// Interview rate as a whole percentage. 0 for an empty list.
pub fn progress_percentage(stats: &DashboardStats) -> u32 {
    if stats.total == 0 {
        return 0;
    }
    (stats.interviews as f64 / stats.total as f64 * 100.0).round() as u32
}

/// Applications added in the last 7 days.
pub fn weekly_count(apps: &[Application]) -> usize {
    selectors::this_week(apps).len()
}

/// Share of applications that got any response (interview, offer or
/// rejection), as a whole percentage.
pub fn response_rate(stats: &DashboardStats) -> u32 {
    if stats.total == 0 {
        return 0;
    }
    let responded = stats.interviews + stats.offers + stats.rejected;
    (responded as f64 / stats.total as f64 * 100.0).round() as u32
}
