//! Filter, group and aggregate over the roster.
//!
//! Every operation is a pure function of the roster, the current
//! [`FilterSelection`] and the metrics source. An empty filtered set is a
//! normal state: groups come back empty, rates fall back to the
//! placeholder and the average to `"0"`.

use tracing::debug;

use crate::filters::FilterSelection;
use crate::metrics::{MetricsSource, SeededMetrics};
use crate::models::{
    Dimension, DistributionSlice, RateStat, Role, RoleCounts, Tone, User, UserGroup,
};
use crate::rng::format_one_decimal;
use crate::roster::roster;

/// Shown for a rate whose denominator is zero.
pub const PLACEHOLDER: &str = "—";

/// A distribution panel and whether the dashboard shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionPanel {
    pub dimension: Dimension,
    pub visible: bool,
}

pub struct Dashboard<'a, S = SeededMetrics> {
    roster: &'a [User],
    selection: &'a FilterSelection,
    source: S,
}

impl<'a> Dashboard<'a, SeededMetrics> {
    /// Dashboard over the built-in roster with seeded demo metrics.
    pub fn new(selection: &'a FilterSelection) -> Self {
        Self::with_source(roster(), selection, SeededMetrics)
    }
}

impl<'a, S: MetricsSource> Dashboard<'a, S> {
    pub fn with_source(roster: &'a [User], selection: &'a FilterSelection, source: S) -> Self {
        Self {
            roster,
            selection,
            source,
        }
    }

    pub fn selection(&self) -> &FilterSelection {
        self.selection
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn filtered_users(&self) -> Vec<User> {
        let users: Vec<User> = self
            .roster
            .iter()
            .filter(|user| self.selection.matches(user))
            .cloned()
            .collect();
        debug!(matched = users.len(), total = self.roster.len(), "filtered roster");
        users
    }

    /// Names offered by the user picker: consistent with every other filter,
    /// ignoring the user-name filter itself.
    pub fn available_user_names(&self) -> Vec<&'static str> {
        self.roster
            .iter()
            .filter(|user| self.selection.matches_groups(user))
            .map(|user| user.name)
            .collect()
    }

    pub fn matching_user_names(&self, search: &str) -> Vec<&'static str> {
        let needle = search.to_lowercase();
        self.available_user_names()
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect()
    }

    /// DFG, then department, then role: the first dimension with a selection.
    pub fn grouping_dimension(&self) -> Option<Dimension> {
        if !self.selection.dfgs().is_empty() {
            Some(Dimension::Dfg)
        } else if !self.selection.departments().is_empty() {
            Some(Dimension::Dept)
        } else if !self.selection.roles().is_empty() {
            Some(Dimension::Role)
        } else {
            None
        }
    }

    pub fn grouped_tables(&self) -> Vec<UserGroup> {
        match self.grouping_dimension() {
            Some(dimension) => self.drill_down(dimension),
            None => vec![UserGroup {
                label: None,
                users: self.filtered_users(),
            }],
        }
    }

    /// Filtered users partitioned by `dimension`, groups in order of first
    /// appearance.
    pub fn drill_down(&self, dimension: Dimension) -> Vec<UserGroup> {
        let mut groups: Vec<UserGroup> = Vec::new();
        for user in self.filtered_users() {
            let label = user.value_of(dimension);
            match groups.iter_mut().find(|group| group.label == Some(label)) {
                Some(group) => group.users.push(user),
                None => groups.push(UserGroup {
                    label: Some(label),
                    users: vec![user],
                }),
            }
        }
        groups
    }

    pub fn distribution_counts(&self, dimension: Dimension) -> Vec<DistributionSlice> {
        let mut slices: Vec<DistributionSlice> = Vec::new();
        for user in self.filtered_users() {
            let label = user.value_of(dimension);
            match slices.iter_mut().find(|slice| slice.label == label) {
                Some(slice) => slice.count += 1,
                None => slices.push(DistributionSlice { label, count: 1 }),
            }
        }
        slices
    }

    /// A panel is hidden when its own dimension is pinned to a single value
    /// and neither of the other two grouping dimensions is filtered.
    pub fn visible_distributions(&self) -> Vec<DistributionPanel> {
        let depts = self.selection.departments().len();
        let dfgs = self.selection.dfgs().len();
        let roles = self.selection.roles().len();
        Dimension::ALL
            .into_iter()
            .map(|dimension| {
                let pinned = match dimension {
                    Dimension::Dept => depts == 1 && dfgs == 0 && roles == 0,
                    Dimension::Dfg => dfgs == 1 && depts == 0 && roles == 0,
                    Dimension::Role => roles == 1 && depts == 0 && dfgs == 0,
                };
                DistributionPanel {
                    dimension,
                    visible: !pinned,
                }
            })
            .collect()
    }

    pub fn role_counts(&self) -> RoleCounts {
        let users = self.filtered_users();
        let providers = users.iter().filter(|u| u.role == Role::Provider).count();
        RoleCounts {
            providers,
            non_providers: users.len() - providers,
        }
    }

    pub fn derived_rates(&self) -> Vec<RateStat> {
        let mut totals = RateTotals::default();
        for user in self.filtered_users() {
            let metrics = self.source.metrics_for(i64::from(user.id));
            totals.recommended += metrics.good_match;
            totals.rejected += metrics.not_a_match;
            totals.watchlist += metrics.watchlist;
            totals.enrolled += metrics.enrolled;
            totals.status_changed += metrics.status_changed;
            totals.reviewed += metrics.reviewed();
        }

        vec![
            RateStat {
                label: "Recommended Rate",
                value: percentage(totals.recommended, totals.status_changed),
                sub_label: "Good Match / Total",
                tone: Tone::Good,
            },
            RateStat {
                label: "Reject Rate",
                value: percentage(totals.rejected, totals.status_changed),
                sub_label: "Not a Match / Total",
                tone: Tone::Bad,
            },
            RateStat {
                label: "Watchlist Ratio",
                value: percentage(totals.watchlist, totals.status_changed),
                sub_label: "Watchlist / Total",
                tone: Tone::Warn,
            },
            RateStat {
                label: "Enrollment Yield",
                value: percentage(totals.enrolled, totals.reviewed),
                sub_label: "Enrolled / Reviewed",
                tone: Tone::Info,
            },
        ]
    }

    pub fn average_screened_per_active_user(&self) -> String {
        let users = self.filtered_users();
        if users.is_empty() {
            return "0".to_string();
        }
        let total: f64 = users
            .iter()
            .map(|user| {
                self.source
                    .metrics_for(i64::from(user.id))
                    .screened_per_active_user
                    .parse::<f64>()
                    .unwrap_or(0.0)
            })
            .sum();
        format_one_decimal(total / users.len() as f64)
    }
}

#[derive(Debug, Default)]
struct RateTotals {
    recommended: i64,
    rejected: i64,
    watchlist: i64,
    enrolled: i64,
    status_changed: i64,
    reviewed: i64,
}

fn percentage(numerator: i64, denominator: i64) -> String {
    if denominator == 0 {
        return PLACEHOLDER.to_string();
    }
    format!(
        "{}%",
        format_one_decimal((numerator as f64 / denominator as f64) * 100.0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Department, Dfg, MetricsSnapshot};

    fn names(users: &[User]) -> Vec<&'static str> {
        users.iter().map(|user| user.name).collect()
    }

    struct ZeroMetrics;

    impl MetricsSource for ZeroMetrics {
        fn metrics_for(&self, _user_id: i64) -> MetricsSnapshot {
            MetricsSnapshot {
                active_days: 0,
                patient_viewed: 0,
                elig_screen_viewed: 0,
                criteria_screen_viewed: 0,
                status_changed: 0,
                good_match: 0,
                under_review: 0,
                not_a_match: 0,
                watchlist: 0,
                enrolled: 0,
                not_reviewed: 0,
                screened_per_active_user: "0.0".to_string(),
            }
        }
    }

    #[test]
    fn unfiltered_dashboard_shows_one_unlabeled_group() {
        let selection = FilterSelection::default();
        let dashboard = Dashboard::new(&selection);
        assert_eq!(dashboard.filtered_users().len(), 12);
        assert_eq!(dashboard.grouping_dimension(), None);
        let groups = dashboard.grouped_tables();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, None);
        assert_eq!(groups[0].users.len(), 12);
    }

    #[test]
    fn urology_filter_groups_by_department() {
        let selection = FilterSelection::default().toggled_department(Department::Urology);
        let dashboard = Dashboard::new(&selection);
        assert_eq!(
            names(&dashboard.filtered_users()),
            ["Dr. Emily Park", "Tom Bradley", "Jake Morrison"]
        );
        assert_eq!(dashboard.grouping_dimension(), Some(Dimension::Dept));
        let groups = dashboard.grouped_tables();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, Some("Urology"));
    }

    #[test]
    fn dfg_takes_precedence_over_role() {
        let selection = FilterSelection::default()
            .toggled_role(Role::Provider)
            .toggled_dfg(Dfg::Gi);
        let dashboard = Dashboard::new(&selection);
        assert_eq!(dashboard.grouping_dimension(), Some(Dimension::Dfg));
        assert_eq!(names(&dashboard.filtered_users()), ["Dr. Sarah Chen"]);
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let selection = FilterSelection::default()
            .toggled_dfg(Dfg::Heme)
            .toggled_dfg(Dfg::Gi);
        let dashboard = Dashboard::new(&selection);
        let labels: Vec<_> = dashboard
            .grouped_tables()
            .into_iter()
            .map(|group| group.label)
            .collect();
        assert_eq!(labels, [Some("GI"), Some("Heme")]);
    }

    #[test]
    fn available_names_ignore_the_name_filter() {
        let selection = FilterSelection::default()
            .toggled_department(Department::Urology)
            .toggled_user("Tom Bradley");
        let dashboard = Dashboard::new(&selection);
        assert_eq!(names(&dashboard.filtered_users()), ["Tom Bradley"]);
        assert_eq!(
            dashboard.available_user_names(),
            ["Dr. Emily Park", "Tom Bradley", "Jake Morrison"]
        );
        assert_eq!(dashboard.matching_user_names("MOR"), ["Jake Morrison"]);
    }

    #[test]
    fn distributions_count_every_dimension() {
        let selection = FilterSelection::default();
        let dashboard = Dashboard::new(&selection);
        let roles = dashboard.distribution_counts(Dimension::Role);
        assert_eq!(
            roles,
            [
                DistributionSlice { label: "Provider", count: 5 },
                DistributionSlice { label: "Non-Provider", count: 7 },
            ]
        );
        let depts = dashboard.distribution_counts(Dimension::Dept);
        assert_eq!(depts.iter().map(|s| s.count).sum::<usize>(), 12);
        assert_eq!(depts[0], DistributionSlice { label: "Smilow Cancer Center", count: 4 });
        let dfgs = dashboard.distribution_counts(Dimension::Dfg);
        assert_eq!(dfgs[0], DistributionSlice { label: "GI", count: 4 });
        assert_eq!(
            dashboard.role_counts(),
            RoleCounts { providers: 5, non_providers: 7 }
        );
    }

    #[test]
    fn drill_down_ignores_main_grouping() {
        let selection = FilterSelection::default().toggled_department(Department::Cardiology);
        let dashboard = Dashboard::new(&selection);
        let by_role = dashboard.drill_down(Dimension::Role);
        assert_eq!(by_role.len(), 2);
        assert_eq!(by_role[0].label, Some("Non-Provider"));
        assert_eq!(names(&by_role[0].users), ["Aisha Patel", "Priya Singh"]);
        assert_eq!(names(&by_role[1].users), ["Dr. Robert Kim"]);
    }

    #[test]
    fn derived_rates_over_full_roster() {
        let selection = FilterSelection::default();
        let dashboard = Dashboard::new(&selection);
        let values: Vec<String> = dashboard.derived_rates().into_iter().map(|r| r.value).collect();
        assert_eq!(values, ["12.2%", "27.8%", "10.1%", "7.1%"]);
        assert_eq!(dashboard.average_screened_per_active_user(), "37.6");
    }

    #[test]
    fn derived_rates_for_urology() {
        let selection = FilterSelection::default().toggled_department(Department::Urology);
        let dashboard = Dashboard::new(&selection);
        let values: Vec<String> = dashboard.derived_rates().into_iter().map(|r| r.value).collect();
        assert_eq!(values, ["12.5%", "25.3%", "10.4%", "8.8%"]);
        assert_eq!(dashboard.average_screened_per_active_user(), "36.5");
    }

    #[test]
    fn empty_result_degrades_gracefully() {
        let selection = FilterSelection::default()
            .toggled_department(Department::Neurology)
            .toggled_role(Role::Provider);
        let dashboard = Dashboard::new(&selection);
        assert!(dashboard.filtered_users().is_empty());
        assert!(dashboard.drill_down(Dimension::Dept).is_empty());
        assert!(dashboard.distribution_counts(Dimension::Dfg).is_empty());
        assert!(dashboard
            .derived_rates()
            .iter()
            .all(|rate| rate.value == PLACEHOLDER));
        assert_eq!(dashboard.average_screened_per_active_user(), "0");
    }

    #[test]
    fn zero_denominators_use_placeholder() {
        let selection = FilterSelection::default();
        let dashboard = Dashboard::with_source(roster(), &selection, ZeroMetrics);
        assert!(dashboard
            .derived_rates()
            .iter()
            .all(|rate| rate.value == PLACEHOLDER));
        assert_eq!(dashboard.average_screened_per_active_user(), "0.0");
    }

    #[test]
    fn pinned_dimension_hides_its_own_panel() {
        let selection = FilterSelection::default().toggled_dfg(Dfg::Gu);
        let dashboard = Dashboard::new(&selection);
        let visible: Vec<bool> = dashboard
            .visible_distributions()
            .iter()
            .map(|panel| panel.visible)
            .collect();
        assert_eq!(visible, [true, false, true]);

        let widened = selection.toggled_role(Role::Provider);
        let dashboard = Dashboard::new(&widened);
        assert!(dashboard.visible_distributions().iter().all(|p| p.visible));
    }
}
