use std::io;

use serde::Serialize;

use crate::metrics::MetricsSource;
use crate::pipeline::Dashboard;
use crate::view::DashboardView;

pub fn render_json(view: &DashboardView) -> serde_json::Result<String> {
    serde_json::to_string_pretty(view)
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    group: &'a str,
    user_id: u32,
    name: &'a str,
    department: &'a str,
    dfg: &'a str,
    role: &'a str,
    sub_role: &'a str,
    active_days: i64,
    patient_viewed: i64,
    elig_screen_viewed: i64,
    criteria_screen_viewed: i64,
    status_changed: i64,
    good_match: i64,
    under_review: i64,
    not_a_match: i64,
    watchlist: i64,
    enrolled: i64,
    not_reviewed: i64,
    screened_per_active_user: &'a str,
}

/// Writes one CSV record per filtered user, in grouped-table order.
/// Returns the number of records written.
pub fn write_metrics_csv<W, S>(writer: W, dashboard: &Dashboard<'_, S>) -> csv::Result<usize>
where
    W: io::Write,
    S: MetricsSource,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut written = 0usize;

    for group in dashboard.grouped_tables() {
        for user in &group.users {
            let metrics = dashboard.source().metrics_for(i64::from(user.id));
            csv_writer.serialize(CsvRow {
                group: group.label.unwrap_or("All users"),
                user_id: user.id,
                name: user.name,
                department: user.dept.as_str(),
                dfg: user.dfg.as_str(),
                role: user.role.as_str(),
                sub_role: user.sub_role,
                active_days: metrics.active_days,
                patient_viewed: metrics.patient_viewed,
                elig_screen_viewed: metrics.elig_screen_viewed,
                criteria_screen_viewed: metrics.criteria_screen_viewed,
                status_changed: metrics.status_changed,
                good_match: metrics.good_match,
                under_review: metrics.under_review,
                not_a_match: metrics.not_a_match,
                watchlist: metrics.watchlist,
                enrolled: metrics.enrolled,
                not_reviewed: metrics.not_reviewed,
                screened_per_active_user: &metrics.screened_per_active_user,
            })?;
            written += 1;
        }
    }

    csv_writer.flush()?;
    Ok(written)
}
