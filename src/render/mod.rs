//! Presentation layer.
//!
//! Renderers only turn prepared table and chart models into text; all
//! numbers come from [`DashboardView`]. The two visual themes differ only in
//! their [`Theme`] palette.

mod export;
mod html;
mod markdown;
mod theme;

use std::fmt::Write;

use crate::models::Tone;
use crate::view::{DashboardView, MetricsTable};

pub use export::{render_json, write_metrics_csv};
pub use html::HtmlRenderer;
pub use markdown::MarkdownRenderer;
pub use theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub text: String,
    pub badge: Option<Badge>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub indent: bool,
    pub derived: bool,
    pub tone: Option<Tone>,
    pub cells: Vec<String>,
}

/// A renderer-agnostic table: a leading label column plus value columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub caption: Option<String>,
    pub group_badge: Option<Badge>,
    pub corner: String,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Bar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl Chart {
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|series| series.values.iter().copied())
            .fold(0.0, f64::max)
    }
}

/// Capability interface a presentation backend implements.
pub trait Renderer {
    fn render_table(&self, table: &Table) -> String;
    fn render_chart(&self, chart: &Chart) -> String;
    fn render_badge(&self, badge: &Badge) -> String;

    fn render_section(&self, title: &str, body: &str) -> String {
        format!("## {title}\n\n{body}\n")
    }

    fn render_stat(&self, label: &str, value: &str, sub_label: Option<&str>, _tone: Tone) -> String {
        match sub_label {
            Some(sub) => format!("- **{label}**: {value} ({sub})\n"),
            None => format!("- **{label}**: {value}\n"),
        }
    }

    fn render_document(&self, title: &str, body: &str) -> String {
        format!("# {title}\n\n{body}")
    }
}

pub fn metrics_table(table: &MetricsTable) -> Table {
    Table {
        caption: table.label.map(|label| {
            let count = table.user_count();
            format!("{label} ({count} user{})", if count > 1 { "s" } else { "" })
        }),
        group_badge: table.group_type.map(|text| Badge {
            text: text.to_string(),
            tone: Tone::Info,
        }),
        corner: "Metric".to_string(),
        headers: table
            .columns
            .iter()
            .map(|column| HeaderCell {
                text: column.title.to_string(),
                badge: Some(Badge {
                    text: column.badge.to_string(),
                    tone: column.tone,
                }),
            })
            .collect(),
        rows: table
            .rows
            .iter()
            .map(|row| Row {
                label: row.label.to_string(),
                indent: row.indent,
                derived: row.derived,
                tone: row.tone,
                cells: row.values.clone(),
            })
            .collect(),
    }
}

fn plain_table(corner: &str, headers: &[&str], rows: Vec<(String, Vec<String>)>) -> Table {
    Table {
        caption: None,
        group_badge: None,
        corner: corner.to_string(),
        headers: headers
            .iter()
            .map(|text| HeaderCell {
                text: text.to_string(),
                badge: None,
            })
            .collect(),
        rows: rows
            .into_iter()
            .map(|(label, cells)| Row {
                label,
                indent: false,
                derived: false,
                tone: None,
                cells,
            })
            .collect(),
    }
}

pub fn appointments_table(view: &DashboardView) -> Table {
    plain_table(
        "Month",
        &[
            "New Appts",
            "Follow-Up",
            "Total Appts",
            "Unique Patients",
            "Total Processed",
            "Manual Refresh",
            "Manual Trial Refresh",
        ],
        view.appointments
            .iter()
            .map(|row| {
                (
                    row.month.clone(),
                    [
                        row.new_appointments,
                        row.follow_up,
                        row.total,
                        row.unique_patients,
                        row.processed,
                        row.manual_refresh,
                        row.manual_trial_refresh,
                    ]
                    .iter()
                    .map(i64::to_string)
                    .collect(),
                )
            })
            .collect(),
    )
}

pub fn appointments_chart(view: &DashboardView) -> Chart {
    // Oldest month first along the axis.
    let rows: Vec<_> = view.appointments.iter().rev().collect();
    Chart {
        title: "Monthly Appointments".to_string(),
        kind: ChartKind::Bar,
        categories: rows.iter().map(|row| row.month.clone()).collect(),
        series: vec![
            Series {
                name: "New".to_string(),
                values: rows.iter().map(|row| row.new_appointments as f64).collect(),
            },
            Series {
                name: "Follow-Up".to_string(),
                values: rows.iter().map(|row| row.follow_up as f64).collect(),
            },
            Series {
                name: "Processed".to_string(),
                values: rows.iter().map(|row| row.processed as f64).collect(),
            },
        ],
    }
}

pub fn dau_table(view: &DashboardView) -> Table {
    plain_table(
        "Date",
        &["DAU", "Providers", "Non-Providers"],
        view.daily_active_users
            .iter()
            .map(|row| {
                (
                    row.label.clone(),
                    vec![
                        row.dau.to_string(),
                        row.providers.to_string(),
                        row.non_providers.to_string(),
                    ],
                )
            })
            .collect(),
    )
}

pub fn dau_chart(view: &DashboardView) -> Chart {
    let rows = &view.daily_active_users;
    Chart {
        title: "Daily Active Users".to_string(),
        kind: ChartKind::Bar,
        categories: rows.iter().map(|row| row.label.clone()).collect(),
        series: vec![
            Series {
                name: "Providers".to_string(),
                values: rows.iter().map(|row| row.providers as f64).collect(),
            },
            Series {
                name: "Non-Providers".to_string(),
                values: rows.iter().map(|row| row.non_providers as f64).collect(),
            },
        ],
    }
}

/// Lays out the whole dashboard with `renderer`.
pub fn render_dashboard(renderer: &dyn Renderer, view: &DashboardView) -> String {
    let mut body = String::new();

    let range = view.filters.date_range;
    let mut filters = format!("Window: {} to {}\n\n", range.start, range.end);
    if view.filters.chips.is_empty() {
        filters.push_str("No filters applied.\n");
    } else {
        for chip in &view.filters.chips {
            let badge = Badge {
                text: chip.value.to_string(),
                tone: chip.kind.tone(),
            };
            let _ = write!(filters, "{} ", renderer.render_badge(&badge));
        }
        filters.push('\n');
    }
    body.push_str(&renderer.render_section("Filters", &filters));

    let summary = &view.summary;
    let mut stats = String::new();
    stats.push_str(&renderer.render_stat(
        "Users",
        &summary.users.to_string(),
        Some("Matching filters"),
        Tone::Info,
    ));
    stats.push_str(&renderer.render_stat(
        "Providers",
        &summary.roles.providers.to_string(),
        None,
        Tone::Good,
    ));
    stats.push_str(&renderer.render_stat(
        "Non-Providers",
        &summary.roles.non_providers.to_string(),
        None,
        Tone::Warn,
    ));
    stats.push_str(&renderer.render_stat(
        "Avg Screened/Day",
        &summary.average_screened_per_day,
        Some("Per active user"),
        Tone::Info,
    ));
    body.push_str(&renderer.render_section("Summary", &stats));

    let mut activity = String::new();
    if view.is_empty() {
        activity.push_str("No users match the current filters.\n");
    } else {
        for table in &view.tables {
            activity.push_str(&renderer.render_table(&metrics_table(table)));
        }
    }
    body.push_str(&renderer.render_section("User Activity", &activity));

    if !view.is_empty() {
        let mut distributions = String::new();
        for panel in view.distributions.iter().filter(|panel| panel.visible) {
            let chart = Chart {
                title: panel.title.clone(),
                kind: ChartKind::Pie,
                categories: panel.slices.iter().map(|s| s.label.to_string()).collect(),
                series: vec![Series {
                    name: "Users".to_string(),
                    values: panel.slices.iter().map(|s| s.count as f64).collect(),
                }],
            };
            distributions.push_str(&renderer.render_chart(&chart));
        }
        body.push_str(&renderer.render_section("Distribution", &distributions));

        let mut rates = String::new();
        for rate in &view.rates {
            rates.push_str(&renderer.render_stat(
                rate.label,
                &rate.value,
                Some(rate.sub_label),
                rate.tone,
            ));
        }
        body.push_str(&renderer.render_section("Derived Rates", &rates));
    }

    let mut appointments = renderer.render_table(&appointments_table(view));
    appointments.push_str(&renderer.render_chart(&appointments_chart(view)));
    body.push_str(&renderer.render_section("Appointments", &appointments));

    let mut dau = renderer.render_table(&dau_table(view));
    dau.push_str(&renderer.render_chart(&dau_chart(view)));
    body.push_str(&renderer.render_section("DAU Trends", &dau));

    renderer.render_document("Prism Usage Dashboard", &body)
}
