use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{DashboardError, DashboardResult};
use crate::models::{Department, Dfg, Role, Tone, User};

/// Inclusive reporting window. Shown on the dashboard but not applied to
/// any data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2026, 1, 18).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2026, 2, 17).unwrap_or_default(),
        }
    }
}

pub fn parse_date(value: &str) -> DashboardResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| DashboardError::InvalidDate {
        value: value.to_string(),
    })
}

/// The filter dimensions a user can pick values from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Dept,
    Dfg,
    User,
    Role,
}

impl FilterKind {
    pub fn tone(self) -> Tone {
        match self {
            FilterKind::Dept => Tone::Info,
            FilterKind::Dfg => Tone::Good,
            FilterKind::User => Tone::Warn,
            FilterKind::Role => Tone::Neutral,
        }
    }
}

/// A removable chip for one selected filter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterChip {
    pub kind: FilterKind,
    pub value: &'static str,
}

/// A complete filter state. Every interaction builds a new value; an empty
/// set places no constraint on its dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterSelection {
    departments: Vec<Department>,
    dfgs: Vec<Dfg>,
    roles: Vec<Role>,
    user_names: Vec<&'static str>,
    date_range: DateRange,
}

fn toggle<T: PartialEq + Copy>(values: &[T], value: T) -> Vec<T> {
    if values.contains(&value) {
        values.iter().copied().filter(|v| *v != value).collect()
    } else {
        let mut next = values.to_vec();
        next.push(value);
        next
    }
}

impl FilterSelection {
    pub fn new(
        departments: Vec<Department>,
        dfgs: Vec<Dfg>,
        roles: Vec<Role>,
        user_names: Vec<&'static str>,
        date_range: DateRange,
    ) -> Self {
        let mut selection = Self {
            date_range,
            ..Self::default()
        };
        for dept in departments {
            selection = selection.selecting_department(dept);
        }
        for dfg in dfgs {
            selection = selection.selecting_dfg(dfg);
        }
        for role in roles {
            selection = selection.selecting_role(role);
        }
        for name in user_names {
            selection = selection.selecting_user(name);
        }
        selection
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn dfgs(&self) -> &[Dfg] {
        &self.dfgs
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn user_names(&self) -> &[&'static str] {
        &self.user_names
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub fn toggled_department(&self, dept: Department) -> Self {
        Self {
            departments: toggle(&self.departments, dept),
            ..self.clone()
        }
    }

    pub fn toggled_dfg(&self, dfg: Dfg) -> Self {
        Self {
            dfgs: toggle(&self.dfgs, dfg),
            ..self.clone()
        }
    }

    pub fn toggled_role(&self, role: Role) -> Self {
        Self {
            roles: toggle(&self.roles, role),
            ..self.clone()
        }
    }

    pub fn toggled_user(&self, name: &'static str) -> Self {
        Self {
            user_names: toggle(&self.user_names, name),
            ..self.clone()
        }
    }

    /// Adds `dept` unless it is already selected.
    pub fn selecting_department(&self, dept: Department) -> Self {
        if self.departments.contains(&dept) {
            self.clone()
        } else {
            self.toggled_department(dept)
        }
    }

    pub fn selecting_dfg(&self, dfg: Dfg) -> Self {
        if self.dfgs.contains(&dfg) {
            self.clone()
        } else {
            self.toggled_dfg(dfg)
        }
    }

    pub fn selecting_role(&self, role: Role) -> Self {
        if self.roles.contains(&role) {
            self.clone()
        } else {
            self.toggled_role(role)
        }
    }

    pub fn selecting_user(&self, name: &'static str) -> Self {
        if self.user_names.contains(&name) {
            self.clone()
        } else {
            self.toggled_user(name)
        }
    }

    pub fn with_date_range(&self, date_range: DateRange) -> Self {
        Self {
            date_range,
            ..self.clone()
        }
    }

    /// Drops every selection; the reporting window is kept.
    pub fn cleared(&self) -> Self {
        Self {
            date_range: self.date_range,
            ..Self::default()
        }
    }

    pub fn has_filters(&self) -> bool {
        !(self.departments.is_empty()
            && self.dfgs.is_empty()
            && self.user_names.is_empty()
            && self.roles.is_empty())
    }

    pub fn active_chips(&self) -> Vec<FilterChip> {
        let depts = self.departments.iter().map(|d| (FilterKind::Dept, d.as_str()));
        let dfgs = self.dfgs.iter().map(|d| (FilterKind::Dfg, d.as_str()));
        let users = self.user_names.iter().map(|n| (FilterKind::User, *n));
        let roles = self.roles.iter().map(|r| (FilterKind::Role, r.as_str()));
        depts
            .chain(dfgs)
            .chain(users)
            .chain(roles)
            .map(|(kind, value)| FilterChip { kind, value })
            .collect()
    }

    /// Department, DFG and role predicates; the user-name set is not consulted.
    pub fn matches_groups(&self, user: &User) -> bool {
        (self.departments.is_empty() || self.departments.contains(&user.dept))
            && (self.dfgs.is_empty() || self.dfgs.contains(&user.dfg))
            && (self.roles.is_empty() || self.roles.contains(&user.role))
    }

    pub fn matches(&self, user: &User) -> bool {
        self.matches_groups(user)
            && (self.user_names.is_empty() || self.user_names.contains(&user.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::ROSTER;

    #[test]
    fn toggling_twice_restores_selection() {
        let base = FilterSelection::default();
        let once = base.toggled_department(Department::Urology);
        assert_eq!(once.departments(), &[Department::Urology]);
        assert_eq!(once.toggled_department(Department::Urology), base);
        assert!(base.departments().is_empty());
    }

    #[test]
    fn clearing_keeps_the_date_range() {
        let range = DateRange {
            start: parse_date("2026-02-01").unwrap(),
            end: parse_date("2026-02-28").unwrap(),
        };
        let selection = FilterSelection::default()
            .toggled_role(Role::Provider)
            .toggled_user("Tom Bradley")
            .with_date_range(range);
        assert!(selection.has_filters());
        let cleared = selection.cleared();
        assert!(!cleared.has_filters());
        assert_eq!(cleared.date_range(), range);
    }

    #[test]
    fn chips_follow_dept_dfg_user_role_order() {
        let selection = FilterSelection::default()
            .toggled_role(Role::NonProvider)
            .toggled_user("Maria Lopez")
            .toggled_dfg(Dfg::Gi)
            .toggled_department(Department::Cardiology);
        let kinds: Vec<FilterKind> = selection.active_chips().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            [FilterKind::Dept, FilterKind::Dfg, FilterKind::User, FilterKind::Role]
        );
    }

    #[test]
    fn empty_selection_matches_everyone() {
        let selection = FilterSelection::default();
        assert!(ROSTER.iter().all(|user| selection.matches(user)));
    }

    #[test]
    fn selecting_is_idempotent() {
        let selection = FilterSelection::default()
            .selecting_dfg(Dfg::Heme)
            .selecting_dfg(Dfg::Heme);
        assert_eq!(selection.dfgs(), &[Dfg::Heme]);
    }

    #[test]
    fn malformed_dates_are_rejected() {
        assert_eq!(
            parse_date("18/01/2026"),
            Err(DashboardError::InvalidDate {
                value: "18/01/2026".to_string()
            })
        );
        assert_eq!(DateRange::default().start, parse_date("2026-01-18").unwrap());
    }
}
