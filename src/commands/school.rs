use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::common::{open_work_dir, stage_badge};
use crate::fs::interaction_files::list_interactions;
use crate::fs::school_files::{add_school, assign_school, load_schools};
use crate::models::school::School;
use crate::pipeline::current::current_stages;

pub struct SchoolArgs {
    pub id: String,
    pub name: String,
    pub employees: Vec<String>,
    pub address: Option<String>,
    pub principal: Option<String>,
    pub students: Option<u32>,
}

pub fn add(base: &Path, args: SchoolArgs) -> Result<()> {
    let work_dir = open_work_dir(base)?;

    let mut school = School::new(args.id, args.name);
    school.address = args.address;
    school.principal_name = args.principal;
    school.total_students = args.students;
    for employee in args.employees {
        school.assign(employee);
    }

    let (id, name) = (school.id.clone(), school.name.clone());
    add_school(&work_dir, school)?;

    println!("{} Added school '{}' ({})", "✓".green(), name, id.cyan());
    Ok(())
}

/// Assign an employee to a school so it shows up in their reports.
pub fn assign(base: &Path, school_id: &str, employee_id: &str) -> Result<()> {
    let work_dir = open_work_dir(base)?;

    if assign_school(&work_dir, school_id, employee_id)? {
        println!(
            "{} Assigned {} to {}",
            "✓".green(),
            employee_id.cyan(),
            school_id.cyan()
        );
    } else {
        println!("{employee_id} is already assigned to {school_id}");
    }
    Ok(())
}

/// List schools with their derived current stage.
pub fn list(base: &Path) -> Result<()> {
    let work_dir = open_work_dir(base)?;
    let schools = load_schools(&work_dir)?;

    if schools.is_empty() {
        println!("No schools yet. Add one with: funnel school add <id> <name>");
        return Ok(());
    }

    let stages = current_stages(&list_interactions(&work_dir)?);

    println!("{} ({})", "Schools".bold(), schools.len());
    println!("{}", "─".repeat(60));
    for school in &schools {
        let stage = stages.get(&school.id).copied().unwrap_or_default();
        let assigned = if school.assigned_employees.is_empty() {
            "unassigned".dimmed().to_string()
        } else {
            school.assigned_employees.join(", ")
        };
        println!(
            "{:<20} {:<32} {:<16} {}",
            school.id.cyan(),
            school.name,
            stage_badge(stage),
            assigned
        );
    }

    Ok(())
}
