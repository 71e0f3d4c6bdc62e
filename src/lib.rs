//! Usage dashboard core: a seeded demo metrics generator and the
//! filter / group / aggregate pipeline that feeds the dashboard views.

pub mod error;
pub mod filters;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod rng;
pub mod roster;
pub mod view;

pub use error::{DashboardError, DashboardResult};
pub use filters::{DateRange, FilterSelection};
pub use metrics::{generate_metrics, MetricsSource, SeededMetrics};
pub use models::{Dimension, MetricsSnapshot, User};
pub use pipeline::Dashboard;
pub use view::DashboardView;
