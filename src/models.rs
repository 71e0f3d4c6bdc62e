use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Department {
    #[serde(rename = "Smilow Cancer Center")]
    SmilowCancerCenter,
    Urology,
    Cardiology,
    Neurology,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::SmilowCancerCenter,
        Department::Urology,
        Department::Cardiology,
        Department::Neurology,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Department::SmilowCancerCenter => "Smilow Cancer Center",
            Department::Urology => "Urology",
            Department::Cardiology => "Cardiology",
            Department::Neurology => "Neurology",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dfg {
    #[serde(rename = "GI")]
    Gi,
    #[serde(rename = "GU")]
    Gu,
    Thoracic,
    Breast,
    Heme,
}

impl Dfg {
    pub const ALL: [Dfg; 5] = [Dfg::Gi, Dfg::Gu, Dfg::Thoracic, Dfg::Breast, Dfg::Heme];

    pub fn as_str(self) -> &'static str {
        match self {
            Dfg::Gi => "GI",
            Dfg::Gu => "GU",
            Dfg::Thoracic => "Thoracic",
            Dfg::Breast => "Breast",
            Dfg::Heme => "Heme",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Provider,
    #[serde(rename = "Non-Provider")]
    NonProvider,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Provider, Role::NonProvider];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Provider => "Provider",
            Role::NonProvider => "Non-Provider",
        }
    }
}

macro_rules! text_enum {
    ($ty:ty, $err:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = DashboardError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                <$ty>::ALL
                    .into_iter()
                    .find(|value| value.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| DashboardError::$err(s.to_string()))
            }
        }
    };
}

text_enum!(Department, UnknownDepartment);
text_enum!(Dfg, UnknownDfg);
text_enum!(Role, UnknownRole);

/// A dimension the roster can be grouped or charted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Dept,
    Dfg,
    Role,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Dept, Dimension::Dfg, Dimension::Role];

    pub fn key(self) -> &'static str {
        match self {
            Dimension::Dept => "dept",
            Dimension::Dfg => "dfg",
            Dimension::Role => "role",
        }
    }

    /// Heading used on group badges and drill-down tables.
    pub fn title(self) -> &'static str {
        match self {
            Dimension::Dept => "Department",
            Dimension::Dfg => "DFG",
            Dimension::Role => "Role",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Dimension {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dept" | "department" => Ok(Dimension::Dept),
            "dfg" => Ok(Dimension::Dfg),
            "role" => Ok(Dimension::Role),
            _ => Err(DashboardError::UnknownDimension(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u32,
    pub name: &'static str,
    pub dept: Department,
    pub dfg: Dfg,
    pub role: Role,
    pub sub_role: &'static str,
}

impl User {
    /// Label of this user's value along `dimension`.
    pub fn value_of(&self, dimension: Dimension) -> &'static str {
        match dimension {
            Dimension::Dept => self.dept.as_str(),
            Dimension::Dfg => self.dfg.as_str(),
            Dimension::Role => self.role.as_str(),
        }
    }

    /// Column header text: long names collapse to their last word.
    pub fn short_name(&self) -> &'static str {
        if self.name.chars().count() > 16 {
            self.name.split_whitespace().last().unwrap_or(self.name)
        } else {
            self.name
        }
    }

    pub fn role_tone(&self) -> Tone {
        match self.role {
            Role::Provider => Tone::Good,
            Role::NonProvider => Tone::Warn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Good,
    Warn,
    Bad,
    Info,
    Muted,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub active_days: i64,
    pub patient_viewed: i64,
    pub elig_screen_viewed: i64,
    pub criteria_screen_viewed: i64,
    pub status_changed: i64,
    pub good_match: i64,
    pub under_review: i64,
    pub not_a_match: i64,
    pub watchlist: i64,
    pub enrolled: i64,
    pub not_reviewed: i64,
    pub screened_per_active_user: String,
}

impl MetricsSnapshot {
    /// Status changes that were actually reviewed.
    pub fn reviewed(&self) -> i64 {
        self.status_changed - self.not_reviewed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    ActiveDays,
    PatientViewed,
    EligScreenViewed,
    CriteriaScreenViewed,
    StatusChanged,
    GoodMatch,
    UnderReview,
    NotAMatch,
    Watchlist,
    Enrolled,
    NotReviewed,
    ScreenedPerActiveUser,
}

impl MetricKey {
    pub fn value_text(self, snapshot: &MetricsSnapshot) -> String {
        let value = match self {
            MetricKey::ActiveDays => snapshot.active_days,
            MetricKey::PatientViewed => snapshot.patient_viewed,
            MetricKey::EligScreenViewed => snapshot.elig_screen_viewed,
            MetricKey::CriteriaScreenViewed => snapshot.criteria_screen_viewed,
            MetricKey::StatusChanged => snapshot.status_changed,
            MetricKey::GoodMatch => snapshot.good_match,
            MetricKey::UnderReview => snapshot.under_review,
            MetricKey::NotAMatch => snapshot.not_a_match,
            MetricKey::Watchlist => snapshot.watchlist,
            MetricKey::Enrolled => snapshot.enrolled,
            MetricKey::NotReviewed => snapshot.not_reviewed,
            MetricKey::ScreenedPerActiveUser => {
                return snapshot.screened_per_active_user.clone();
            }
        };
        value.to_string()
    }
}

/// One row of the per-user metrics table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricRow {
    pub key: MetricKey,
    pub label: &'static str,
    pub indent: bool,
    pub derived: bool,
    pub tone: Option<Tone>,
}

const fn row(key: MetricKey, label: &'static str) -> MetricRow {
    MetricRow {
        key,
        label,
        indent: false,
        derived: false,
        tone: None,
    }
}

const fn sub_row(key: MetricKey, label: &'static str, tone: Tone) -> MetricRow {
    MetricRow {
        key,
        label,
        indent: true,
        derived: false,
        tone: Some(tone),
    }
}

pub const METRIC_ROWS: [MetricRow; 12] = [
    row(MetricKey::ActiveDays, "Active Days"),
    row(MetricKey::PatientViewed, "Patient Viewed (Care State – L1)"),
    row(MetricKey::EligScreenViewed, "Eligibility Screen Viewed"),
    row(MetricKey::CriteriaScreenViewed, "Criteria Screen Viewed (L2)"),
    row(MetricKey::StatusChanged, "Patient Study Status Changed"),
    sub_row(MetricKey::GoodMatch, "Good Match", Tone::Good),
    sub_row(MetricKey::UnderReview, "Under Review", Tone::Warn),
    sub_row(MetricKey::NotAMatch, "Not a Match", Tone::Bad),
    sub_row(MetricKey::Watchlist, "Watchlist", Tone::Warn),
    sub_row(MetricKey::Enrolled, "Enrolled", Tone::Good),
    sub_row(MetricKey::NotReviewed, "Not Reviewed (NONE / PROCESSED)", Tone::Muted),
    MetricRow {
        key: MetricKey::ScreenedPerActiveUser,
        label: "Patients Screened / Active User / Day",
        indent: false,
        derived: true,
        tone: None,
    },
];

/// Users sharing one value of a dimension. `label` is `None` for the single
/// ungrouped table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserGroup {
    pub label: Option<&'static str>,
    pub users: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionSlice {
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateStat {
    pub label: &'static str,
    pub value: String,
    pub sub_label: &'static str,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleCounts {
    pub providers: usize,
    pub non_providers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyAppointments {
    pub month: String,
    pub new_appointments: i64,
    pub follow_up: i64,
    pub total: i64,
    pub unique_patients: i64,
    pub processed: i64,
    pub manual_refresh: i64,
    pub manual_trial_refresh: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyActiveUsers {
    pub date: chrono::NaiveDate,
    pub label: String,
    pub dau: i64,
    pub providers: i64,
    pub non_providers: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!("urology".parse::<Department>(), Ok(Department::Urology));
        assert_eq!(" gi ".parse::<Dfg>(), Ok(Dfg::Gi));
        assert_eq!("non-provider".parse::<Role>(), Ok(Role::NonProvider));
        assert_eq!(
            "Oncology".parse::<Department>(),
            Err(DashboardError::UnknownDepartment("Oncology".to_string()))
        );
    }

    #[test]
    fn dimension_accepts_long_department_name() {
        assert_eq!("department".parse::<Dimension>(), Ok(Dimension::Dept));
        assert!("team".parse::<Dimension>().is_err());
    }

    #[test]
    fn long_names_collapse_to_last_word() {
        let user = User {
            id: 99,
            name: "Dr. Alexandra Montgomery",
            dept: Department::Neurology,
            dfg: Dfg::Heme,
            role: Role::Provider,
            sub_role: "Physician",
        };
        assert_eq!(user.short_name(), "Montgomery");
        assert_eq!(user.role_tone(), Tone::Good);
    }

    #[test]
    fn labels_serialize_as_display_text() {
        let json = serde_json::to_string(&Department::SmilowCancerCenter).unwrap();
        assert_eq!(json, "\"Smilow Cancer Center\"");
        let json = serde_json::to_string(&Role::NonProvider).unwrap();
        assert_eq!(json, "\"Non-Provider\"");
    }
}
