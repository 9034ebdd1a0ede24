//! The school list, stored as a YAML sequence in `.funnel/schools.yaml`.

use anyhow::{bail, Context, Result};
use std::fs;

use super::work_dir::WorkDir;
use crate::models::school::School;
use crate::validation::validate_id;

pub fn load_schools(work_dir: &WorkDir) -> Result<Vec<School>> {
    let path = work_dir.schools_file();
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn save_schools(work_dir: &WorkDir, schools: &[School]) -> Result<()> {
    let path = work_dir.schools_file();
    let content = serde_yaml::to_string(schools).context("Failed to serialize schools")?;
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Add a school, rejecting duplicate IDs.
pub fn add_school(work_dir: &WorkDir, school: School) -> Result<()> {
    validate_id(&school.id).context("Invalid school ID")?;
    for employee in &school.assigned_employees {
        validate_id(employee).context("Invalid employee ID")?;
    }

    let mut schools = load_schools(work_dir)?;
    if schools.iter().any(|s| s.id == school.id) {
        bail!("School '{}' already exists", school.id);
    }

    tracing::info!(school = %school.id, "adding school");
    schools.push(school);
    save_schools(work_dir, &schools)
}

/// Assign an employee to an existing school.
///
/// Returns false when the employee was already assigned; the file is left untouched.
pub fn assign_school(work_dir: &WorkDir, school_id: &str, employee_id: &str) -> Result<bool> {
    validate_id(employee_id).context("Invalid employee ID")?;

    let mut schools = load_schools(work_dir)?;
    let Some(school) = schools.iter_mut().find(|s| s.id == school_id) else {
        bail!("School '{school_id}' not found");
    };

    if school.is_assigned_to(employee_id) {
        return Ok(false);
    }

    school.assign(employee_id);
    tracing::info!(school = %school_id, employee = %employee_id, "assigned school");
    save_schools(work_dir, &schools)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_add_and_load_schools() {
        let temp_dir = TempDir::new().unwrap();
        let work_dir = WorkDir::new(temp_dir.path());
        work_dir.initialize().unwrap();
        assert!(load_schools(&work_dir).unwrap().is_empty());

        let mut school = School::new("school-1", "Greenfield High School");
        school.assign("emp-1");
        add_school(&work_dir, school.clone()).unwrap();

        assert_eq!(load_schools(&work_dir).unwrap(), vec![school]);
    }

    #[test]
    fn test_add_duplicate_school_fails() {
        let temp_dir = TempDir::new().unwrap();
        let work_dir = WorkDir::new(temp_dir.path());
        work_dir.initialize().unwrap();

        add_school(&work_dir, School::new("school-1", "Greenfield")).unwrap();
        let err = add_school(&work_dir, School::new("school-1", "Other")).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_assign_school_appends_once() {
        let temp_dir = TempDir::new().unwrap();
        let work_dir = WorkDir::new(temp_dir.path());
        work_dir.initialize().unwrap();

        let mut school = School::new("school-1", "Greenfield");
        school.assign("emp-1");
        add_school(&work_dir, school).unwrap();

        assert!(assign_school(&work_dir, "school-1", "emp-2").unwrap());
        assert!(!assign_school(&work_dir, "school-1", "emp-2").unwrap());

        let schools = load_schools(&work_dir).unwrap();
        assert_eq!(schools[0].assigned_employees, vec!["emp-1", "emp-2"]);
    }

    #[test]
    fn test_assign_school_rejects_unknown_school_and_bad_ids() {
        let temp_dir = TempDir::new().unwrap();
        let work_dir = WorkDir::new(temp_dir.path());
        work_dir.initialize().unwrap();
        add_school(&work_dir, School::new("school-1", "Greenfield")).unwrap();

        let err = assign_school(&work_dir, "school-9", "emp-1").unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(assign_school(&work_dir, "school-1", "emp 1").is_err());
        assert!(load_schools(&work_dir).unwrap()[0].assigned_employees.is_empty());
    }

    #[test]
    fn test_add_school_validates_ids() {
        let temp_dir = TempDir::new().unwrap();
        let work_dir = WorkDir::new(temp_dir.path());
        work_dir.initialize().unwrap();

        assert!(add_school(&work_dir, School::new("../x", "Bad")).is_err());

        let mut school = School::new("school-2", "Riverside");
        school.assign("emp 2");
        assert!(add_school(&work_dir, school).is_err());
    }
}
