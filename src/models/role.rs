//! Viewer capability handed to dashboards by the caller.
//!
//! Roles are never read from global state; whoever renders a view supplies the
//! [`Viewer`] it renders for.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::FunnelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    ItSupport,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::ItSupport => "it_support",
            Role::Employee => "employee",
        }
    }

    /// Only super admins see every school; everyone else sees their assignments.
    pub fn sees_all_schools(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = FunnelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Role::SuperAdmin),
            "it_support" => Ok(Role::ItSupport),
            "employee" => Ok(Role::Employee),
            _ => Err(FunnelError::UnknownRole(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub role: Role,
    pub employee_id: String,
}

impl Viewer {
    pub fn new(role: Role, employee_id: impl Into<String>) -> Self {
        Self {
            role,
            employee_id: employee_id.into(),
        }
    }

    /// True when the viewer sees every school or is among `assigned_employees`.
    pub fn can_view(&self, assigned_employees: &[String]) -> bool {
        self.role.sees_all_schools() || assigned_employees.contains(&self.employee_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::school::School;

    #[test]
    fn test_role_parsing() {
        assert_eq!("super_admin".parse::<Role>(), Ok(Role::SuperAdmin));
        assert_eq!("employee".parse::<Role>(), Ok(Role::Employee));
        assert_eq!(
            "admin".parse::<Role>(),
            Err(FunnelError::UnknownRole("admin".to_string()))
        );
    }

    #[test]
    fn test_viewer_visibility() {
        let mut school = School::new("school-1", "Greenfield High School");
        school.assign("emp-1");

        assert!(Viewer::new(Role::Employee, "emp-1").can_view(&school.assigned_employees));
        assert!(!Viewer::new(Role::Employee, "emp-2").can_view(&school.assigned_employees));
        assert!(!Viewer::new(Role::ItSupport, "emp-2").can_view(&school.assigned_employees));
        assert!(Viewer::new(Role::SuperAdmin, "admin").can_view(&school.assigned_employees));
    }
}
