//! Pure query functions over a snapshot of the application list.
//!
//! Every selector borrows the list, mutates nothing, and preserves the
//! relative order of its input unless it says otherwise.

use std::cmp::Reverse;

use crate::date;
use crate::schema::{Application, Status};

/// Status filter for the list view. `All` is the sentinel meaning "no filter".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

/// First application with the given id, if any.
pub fn by_id<'a>(apps: &'a [Application], id: &str) -> Option<&'a Application> {
    apps.iter().find(|app| app.id == id)
}

/// All applications in the given status, in list order.
pub fn by_status(apps: &[Application], status: Status) -> Vec<&Application> {
    apps.iter().filter(|app| app.status == status).collect()
}

/// Case-insensitive substring match on the company name.
pub fn by_company_name<'a>(apps: &'a [Application], company: &str) -> Vec<&'a Application> {
    let needle = company.to_lowercase();
    apps.iter()
        .filter(|app| app.company_name.to_lowercase().contains(&needle))
        .collect()
}

/// Case-insensitive substring match on the role.
pub fn by_role<'a>(apps: &'a [Application], role: &str) -> Vec<&'a Application> {
    let needle = role.to_lowercase();
    apps.iter()
        .filter(|app| app.role.to_lowercase().contains(&needle))
        .collect()
}

/// Case-insensitive substring match on company name OR role.
pub fn by_search_term<'a>(apps: &'a [Application], term: &str) -> Vec<&'a Application> {
    let needle = term.to_lowercase();
    apps.iter()
        .filter(|app| {
            app.company_name.to_lowercase().contains(&needle)
                || app.role.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Up to `limit` applications, most recently applied first.
///
/// Sort is stable, so ties (and unparsable dates, which sort last) keep
/// their original relative order.
pub fn recent(apps: &[Application], limit: usize) -> Vec<&Application> {
    let mut sorted: Vec<&Application> = apps.iter().collect();
    sorted.sort_by_key(|app| Reverse(date::parse_display(&app.date_applied)));
    sorted.truncate(limit);
    sorted
}

/// Applications whose applied date falls within the last 7 days, inclusive.
pub fn this_week(apps: &[Application]) -> Vec<&Application> {
    apps.iter()
        .filter(|app| {
            date::parse_display(&app.date_applied).is_some_and(date::is_within_week)
        })
        .collect()
}

/// Distinct resume names, first-occurrence order.
pub fn unique_resumes(apps: &[Application]) -> Vec<&str> {
    let mut seen = Vec::new();
    for app in apps {
        if !seen.contains(&app.resume_name.as_str()) {
            seen.push(app.resume_name.as_str());
        }
    }
    seen
}

/// How many applications used the given resume.
pub fn resume_usage_count(apps: &[Application], resume_name: &str) -> usize {
    apps.iter()
        .filter(|app| app.resume_name == resume_name)
        .count()
}

/// Composite list filter: status first, then free-text search on the result.
///
/// With `StatusFilter::All` and an empty search term this is the identity.
pub fn filter_applications<'a>(
    apps: &'a [Application],
    search_term: &str,
    status_filter: StatusFilter,
) -> Vec<&'a Application> {
    let mut result: Vec<&Application> = match status_filter {
        StatusFilter::All => apps.iter().collect(),
        StatusFilter::Only(status) => by_status(apps, status),
    };

    if !search_term.is_empty() {
        let needle = search_term.to_lowercase();
        result.retain(|app| {
            app.company_name.to_lowercase().contains(&needle)
                || app.role.to_lowercase().contains(&needle)
        });
    }

    result
}
