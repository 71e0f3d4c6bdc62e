use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

use crate::models::{DailyActiveUsers, MetricsSnapshot, MonthlyAppointments};
use crate::rng::{format_one_decimal, SeededRandom};

/// Supplies a metrics snapshot per user. The seeded generator stands in for
/// a real usage feed.
pub trait MetricsSource {
    fn metrics_for(&self, user_id: i64) -> MetricsSnapshot;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SeededMetrics;

impl MetricsSource for SeededMetrics {
    fn metrics_for(&self, user_id: i64) -> MetricsSnapshot {
        generate_metrics(user_id)
    }
}

/// Fabricates the usage counters for one user.
///
/// The draw order is fixed: reordering changes every value for every user.
pub fn generate_metrics(user_id: i64) -> MetricsSnapshot {
    let mut rng = SeededRandom::for_user(user_id);
    let active_days = rng.draw(20, 3);
    let patient_viewed = rng.draw(300, 20);
    let elig_screen_viewed = rng.draw(200, 10);
    let criteria_screen_viewed = rng.draw(150, 5);
    let good_match = rng.draw(40, 2);
    let under_review = rng.draw(30, 1);
    let not_a_match = rng.draw(50, 5);
    let watchlist = rng.draw(20, 1);
    let enrolled = rng.draw(10, 0);
    let not_reviewed = rng.draw(60, 10);

    let status_changed =
        good_match + under_review + not_a_match + watchlist + enrolled + not_reviewed;

    let screened_per_active_user = if active_days > 0 {
        format_one_decimal(status_changed as f64 / active_days as f64)
    } else {
        "0.0".to_string()
    };

    MetricsSnapshot {
        active_days,
        patient_viewed,
        elig_screen_viewed,
        criteria_screen_viewed,
        status_changed,
        good_match,
        under_review,
        not_a_match,
        watchlist,
        enrolled,
        not_reviewed,
        screened_per_active_user,
    }
}

const APPOINTMENT_MONTHS: u32 = 6;
const DAU_SPAN_DAYS: i64 = 45;

fn series_anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default()
}

/// Monthly appointment volumes, newest month first.
pub fn monthly_appointments() -> Vec<MonthlyAppointments> {
    let anchor = series_anchor();
    (0..APPOINTMENT_MONTHS)
        .filter_map(|index| {
            let month = anchor.checked_sub_months(Months::new(index))?;
            let mut rng = SeededRandom::new(i64::from(index) * 999 + 7);
            let new_appointments = rng.draw(400, 100);
            let follow_up = rng.draw(300, 50);
            let total = new_appointments + follow_up;
            let unique_patients = (total as f64 * (0.6 + rng.next_f64() * 0.3)).floor() as i64;
            let processed = (total as f64 * (0.7 + rng.next_f64() * 0.2)).floor() as i64;
            let manual_refresh = rng.draw(50, 5);
            let manual_trial_refresh = rng.draw(30, 2);
            Some(MonthlyAppointments {
                month: month.format("%b %Y").to_string(),
                new_appointments,
                follow_up,
                total,
                unique_patients,
                processed,
                manual_refresh,
                manual_trial_refresh,
            })
        })
        .collect()
}

/// Weekday active-user counts. Weekend days are skipped but still consume
/// their seed index.
pub fn daily_active_users() -> Vec<DailyActiveUsers> {
    let anchor = series_anchor();
    (0..DAU_SPAN_DAYS)
        .filter_map(|index| {
            let date = anchor + Duration::days(index);
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                return None;
            }
            let mut rng = SeededRandom::new(index * 31 + 13);
            let providers = rng.draw(4, 1);
            let non_providers = rng.draw(5, 1);
            Some(DailyActiveUsers {
                date,
                label: date.format("%b %-d").to_string(),
                dau: providers + non_providers,
                providers,
                non_providers,
            })
        })
        .collect()
}
