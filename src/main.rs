use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use prism_dashboard::filters::{parse_date, DateRange};
use prism_dashboard::metrics::{daily_active_users, monthly_appointments};
use prism_dashboard::models::{Department, Dfg, Role};
use prism_dashboard::render::{self, HtmlRenderer, MarkdownRenderer, Theme};
use prism_dashboard::roster::find_user_name;
use prism_dashboard::{generate_metrics, Dashboard, DashboardView, Dimension, FilterSelection};

#[derive(Parser)]
#[command(name = "prism-dashboard")]
#[command(about = "Usage dashboard over the demo roster with seeded metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List roster users matching the filters
    Users {
        #[command(flatten)]
        filters: FilterArgs,
        /// Only list names containing this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Show user counts and drill-down groups for one dimension
    Distribution {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, default_value = "dept")]
        dimension: Dimension,
    },
    /// Print one user's metrics snapshot as JSON
    Metrics {
        #[arg(long)]
        user_id: i64,
    },
    /// Render the full dashboard
    Report {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, value_enum, default_value_t = Format::Markdown)]
        format: Format,
        #[arg(long, default_value = "prism")]
        theme: Theme,
        #[arg(long, default_value = "dashboard.md")]
        out: PathBuf,
    },
    /// Write the per-user metrics table as CSV
    Export {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long)]
        csv: PathBuf,
    },
    /// Print monthly appointment volumes
    Appointments,
    /// Print daily active users
    Dau,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Markdown,
    Html,
    Json,
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long = "dept")]
    departments: Vec<String>,
    #[arg(long = "dfg")]
    dfgs: Vec<String>,
    #[arg(long = "role")]
    roles: Vec<String>,
    #[arg(long = "user")]
    users: Vec<String>,
    #[arg(long, default_value = "2026-01-18")]
    from: String,
    #[arg(long, default_value = "2026-02-17")]
    to: String,
}

impl FilterArgs {
    fn selection(&self) -> anyhow::Result<FilterSelection> {
        let departments = self
            .departments
            .iter()
            .map(|value| value.parse::<Department>())
            .collect::<Result<Vec<_>, _>>()?;
        let dfgs = self
            .dfgs
            .iter()
            .map(|value| value.parse::<Dfg>())
            .collect::<Result<Vec<_>, _>>()?;
        let roles = self
            .roles
            .iter()
            .map(|value| value.parse::<Role>())
            .collect::<Result<Vec<_>, _>>()?;
        let users = self
            .users
            .iter()
            .map(|value| find_user_name(value))
            .collect::<Result<Vec<_>, _>>()?;
        let date_range = DateRange {
            start: parse_date(&self.from)?,
            end: parse_date(&self.to)?,
        };
        Ok(FilterSelection::new(departments, dfgs, roles, users, date_range))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Users { filters, search } => {
            let selection = filters.selection()?;
            let dashboard = Dashboard::new(&selection);
            let mut users = dashboard.filtered_users();
            if let Some(search) = search.as_deref() {
                let names = dashboard.matching_user_names(search);
                users.retain(|user| names.contains(&user.name));
            }

            if users.is_empty() {
                println!("No users match these filters.");
                return Ok(());
            }

            for user in users {
                println!(
                    "- {} ({}, {}, {}, {})",
                    user.name, user.dept, user.dfg, user.role, user.sub_role
                );
            }
        }
        Commands::Distribution { filters, dimension } => {
            let selection = filters.selection()?;
            let dashboard = Dashboard::new(&selection);
            let slices = dashboard.distribution_counts(dimension);

            if slices.is_empty() {
                println!("No users match these filters.");
                return Ok(());
            }

            println!("{} distribution:", dimension.title());
            for slice in &slices {
                println!("- {}: {}", slice.label, slice.count);
            }
            for group in dashboard.drill_down(dimension) {
                let label = group.label.unwrap_or("All users");
                let names: Vec<&str> = group.users.iter().map(|user| user.name).collect();
                println!("{label}: {}", names.join(", "));
            }
        }
        Commands::Metrics { user_id } => {
            let snapshot = generate_metrics(user_id);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Commands::Report {
            filters,
            format,
            theme,
            out,
        } => {
            let selection = filters.selection()?;
            let dashboard = Dashboard::new(&selection);
            let view = DashboardView::build(&dashboard);
            info!(users = view.summary.users, grouping = ?view.grouping, "built dashboard view");

            let report = match format {
                Format::Markdown => render::render_dashboard(&MarkdownRenderer, &view),
                Format::Html => {
                    let renderer = HtmlRenderer::new(theme);
                    info!(theme = renderer.theme().name, "rendering html");
                    render::render_dashboard(&renderer, &view)
                }
                Format::Json => render::render_json(&view).context("failed to serialize view")?,
            };
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Dashboard written to {}.", out.display());
        }
        Commands::Export { filters, csv } => {
            let selection = filters.selection()?;
            let dashboard = Dashboard::new(&selection);
            let file = std::fs::File::create(&csv)
                .with_context(|| format!("failed to create {}", csv.display()))?;
            let written = render::write_metrics_csv(file, &dashboard)?;
            println!("Exported {written} users to {}.", csv.display());
        }
        Commands::Appointments => {
            for row in monthly_appointments() {
                println!(
                    "- {}: {} new, {} follow-up, {} total, {} unique patients, {} processed, \
                     {} manual refresh, {} manual trial refresh",
                    row.month,
                    row.new_appointments,
                    row.follow_up,
                    row.total,
                    row.unique_patients,
                    row.processed,
                    row.manual_refresh,
                    row.manual_trial_refresh
                );
            }
        }
        Commands::Dau => {
            for row in daily_active_users() {
                println!(
                    "- {}: {} active ({} providers, {} non-providers)",
                    row.label, row.dau, row.providers, row.non_providers
                );
            }
        }
    }

    Ok(())
}
