use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_students: Option<u32>,
    /// Employee IDs responsible for this school
    #[serde(default)]
    pub assigned_employees: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl School {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: None,
            principal_name: None,
            phone: None,
            email: None,
            total_students: None,
            assigned_employees: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn assign(&mut self, employee_id: impl Into<String>) {
        let employee_id = employee_id.into();
        if !self.assigned_employees.contains(&employee_id) {
            self.assigned_employees.push(employee_id);
        }
    }

    pub fn is_assigned_to(&self, employee_id: &str) -> bool {
        self.assigned_employees.iter().any(|e| e == employee_id)
    }

    pub fn primary_employee(&self) -> Option<&str> {
        self.assigned_employees.first().map(String::as_str)
    }
}

/// Look up a school by ID.
pub fn find_school<'a>(schools: &'a [School], school_id: &str) -> Option<&'a School> {
    schools.iter().find(|s| s.id == school_id)
}
