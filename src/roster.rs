use crate::error::{DashboardError, DashboardResult};
use crate::models::{Department, Dfg, Role, User};

use Department::{Cardiology, Neurology, SmilowCancerCenter, Urology};

const fn user(
    id: u32,
    name: &'static str,
    dept: Department,
    dfg: Dfg,
    role: Role,
    sub_role: &'static str,
) -> User {
    User {
        id,
        name,
        dept,
        dfg,
        role,
        sub_role,
    }
}

pub static ROSTER: [User; 12] = [
    user(1, "Dr. Sarah Chen", SmilowCancerCenter, Dfg::Gi, Role::Provider, "Physician"),
    user(2, "Dr. James Wilson", SmilowCancerCenter, Dfg::Gu, Role::Provider, "Physician"),
    user(3, "Dr. Emily Park", Urology, Dfg::Gu, Role::Provider, "Physician"),
    user(4, "Maria Lopez", SmilowCancerCenter, Dfg::Gi, Role::NonProvider, "Research Nurse"),
    user(5, "Tom Bradley", Urology, Dfg::Thoracic, Role::NonProvider, "Study CRC"),
    user(6, "Aisha Patel", Cardiology, Dfg::Breast, Role::NonProvider, "Admin Nurse"),
    user(7, "Dr. Robert Kim", Cardiology, Dfg::Heme, Role::Provider, "Physician"),
    user(8, "Nina Gonzalez", Neurology, Dfg::Thoracic, Role::NonProvider, "Research Nurse"),
    user(9, "Chris Taylor", Neurology, Dfg::Gi, Role::NonProvider, "Study CRC"),
    user(10, "Dr. Lisa Wang", SmilowCancerCenter, Dfg::Breast, Role::Provider, "Physician"),
    user(11, "Jake Morrison", Urology, Dfg::Heme, Role::NonProvider, "Admin Nurse"),
    user(12, "Priya Singh", Cardiology, Dfg::Gi, Role::NonProvider, "Study CRC"),
];

pub fn roster() -> &'static [User] {
    &ROSTER
}

/// Resolves a user name against the roster, returning its canonical spelling.
pub fn find_user_name(name: &str) -> DashboardResult<&'static str> {
    let wanted = name.trim();
    ROSTER
        .iter()
        .find(|user| user.name.eq_ignore_ascii_case(wanted))
        .map(|user| user.name)
        .ok_or_else(|| DashboardError::UnknownUser(name.to_string()))
}
