use serde::Serialize;

use crate::filters::{DateRange, FilterChip, FilterSelection};
use crate::metrics::{daily_active_users, monthly_appointments, MetricsSource};
use crate::models::{
    DailyActiveUsers, Dimension, DistributionSlice, MetricKey, MonthlyAppointments, RateStat,
    RoleCounts, Tone, User, UserGroup, METRIC_ROWS,
};
use crate::pipeline::Dashboard;

/// Everything a presentation layer needs, with no business logic left to do.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub filters: FilterEcho,
    pub summary: Summary,
    pub grouping: Option<Dimension>,
    pub tables: Vec<MetricsTable>,
    pub distributions: Vec<DistributionView>,
    pub rates: Vec<RateStat>,
    pub appointments: Vec<MonthlyAppointments>,
    pub daily_active_users: Vec<DailyActiveUsers>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterEcho {
    pub chips: Vec<FilterChip>,
    pub date_range: DateRange,
    pub available_user_names: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub users: usize,
    #[serde(flatten)]
    pub roles: RoleCounts,
    pub average_screened_per_day: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnHeader {
    pub user_id: u32,
    pub title: &'static str,
    pub badge: &'static str,
    pub tone: Tone,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub key: MetricKey,
    pub label: &'static str,
    pub indent: bool,
    pub derived: bool,
    pub tone: Option<Tone>,
    pub values: Vec<String>,
}

/// One metrics table: a column per user, a row per metric.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsTable {
    pub label: Option<&'static str>,
    pub group_type: Option<&'static str>,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<TableRow>,
}

impl MetricsTable {
    pub fn build<S: MetricsSource>(
        source: &S,
        group: &UserGroup,
        group_type: Option<Dimension>,
    ) -> Self {
        let snapshots: Vec<_> = group
            .users
            .iter()
            .map(|user| source.metrics_for(i64::from(user.id)))
            .collect();
        let rows = METRIC_ROWS
            .iter()
            .map(|row| TableRow {
                key: row.key,
                label: row.label,
                indent: row.indent,
                derived: row.derived,
                tone: row.tone,
                values: snapshots.iter().map(|m| row.key.value_text(m)).collect(),
            })
            .collect();
        Self {
            label: group.label,
            group_type: group_type.map(Dimension::title),
            columns: group.users.iter().map(column_header).collect(),
            rows,
        }
    }

    pub fn user_count(&self) -> usize {
        self.columns.len()
    }
}

fn column_header(user: &User) -> ColumnHeader {
    ColumnHeader {
        user_id: user.id,
        title: user.short_name(),
        badge: user.sub_role,
        tone: user.role_tone(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DistributionView {
    pub dimension: Dimension,
    pub title: String,
    pub visible: bool,
    pub slices: Vec<DistributionSlice>,
    pub drill_down: Vec<MetricsTable>,
}

impl DashboardView {
    pub fn build<S: MetricsSource>(dashboard: &Dashboard<'_, S>) -> Self {
        let selection: &FilterSelection = dashboard.selection();
        let grouping = dashboard.grouping_dimension();
        let users = dashboard.filtered_users();

        let tables = if users.is_empty() {
            Vec::new()
        } else {
            dashboard
                .grouped_tables()
                .iter()
                .map(|group| MetricsTable::build(dashboard.source(), group, grouping))
                .collect()
        };

        let distributions = dashboard
            .visible_distributions()
            .into_iter()
            .map(|panel| DistributionView {
                dimension: panel.dimension,
                title: format!("{} Distribution", panel.dimension.title()),
                visible: panel.visible,
                slices: dashboard.distribution_counts(panel.dimension),
                drill_down: dashboard
                    .drill_down(panel.dimension)
                    .iter()
                    .map(|group| MetricsTable::build(dashboard.source(), group, Some(panel.dimension)))
                    .collect(),
            })
            .collect();

        Self {
            filters: FilterEcho {
                chips: selection.active_chips(),
                date_range: selection.date_range(),
                available_user_names: dashboard.available_user_names(),
            },
            summary: Summary {
                users: users.len(),
                roles: dashboard.role_counts(),
                average_screened_per_day: dashboard.average_screened_per_active_user(),
            },
            grouping,
            tables,
            distributions,
            rates: dashboard.derived_rates(),
            appointments: monthly_appointments(),
            daily_active_users: daily_active_users(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary.users == 0
    }
}
