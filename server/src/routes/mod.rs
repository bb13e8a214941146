// route tables and handlers

pub mod raceplans;
pub mod races;
pub mod startlists;
pub mod time_events;

use axum::http::{HeaderMap, header};

/// roles allowed to administrate plans, startlists and races
pub(crate) const ADMIN_ROLES: &[&str] = &["admin", "event-admin"];
/// timing clients may additionally ingest time events
pub(crate) const TIMING_ROLES: &[&str] = &["admin", "event-admin", "timing-admin"];

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}
