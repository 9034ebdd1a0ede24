//! Integration tests for dashboard aggregation, role filtering and exports

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use funnel::commands::{init, school as school_cmd};
use funnel::commands::report::{build_report, ReportArgs};
use funnel::export::{funnel_progress_table, visit_history_table};
use funnel::fs::interaction_files::{list_interactions, save_interaction};
use funnel::fs::school_files::{add_school, load_schools};
use funnel::fs::WorkDir;
use funnel::models::interaction::InteractionDraft;
use funnel::models::role::Role;
use funnel::models::school::School;
use funnel::models::stage::FunnelStage;
use funnel::pipeline::Staleness;
use std::fs;
use tempfile::TempDir;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn school(id: &str, name: &str, employee: &str) -> School {
    let mut school = School::new(id, name);
    school.assign(employee);
    school
}

fn record(work_dir: &WorkDir, id: &str, school_id: &str, stage: FunnelStage, days_ago: i64) {
    let action = funnel::models::next_step::options_for(stage)[0];
    let mut draft = InteractionDraft::new(school_id, "emp-1");
    draft.set_stage(stage);
    draft.select_action(action);
    draft.set_comments(format!("{school_id} at {stage}"));
    draft.schedule(as_of(), NaiveTime::from_hms_opt(10, 0, 0).unwrap());

    let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() - Duration::days(days_ago);
    draft.set_visit(created.date_naive(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    let interaction = draft.commit(id.to_string(), created).unwrap();
    save_interaction(work_dir, &interaction).expect("Should save interaction");
}

/// Three schools: one won, one in consideration, one never visited.
fn setup() -> (TempDir, WorkDir) {
    let temp_dir = TempDir::new().unwrap();
    init::execute(temp_dir.path()).expect("Should initialize");
    let work_dir = WorkDir::new(temp_dir.path());

    add_school(&work_dir, school("greenfield", "Greenfield High School", "emp-1")).unwrap();
    add_school(&work_dir, school("riverside", "Riverside Academy", "emp-2")).unwrap();
    add_school(&work_dir, school("hillcrest", "Hillcrest Middle School", "emp-1")).unwrap();

    record(&work_dir, "visit-a", "greenfield", FunnelStage::Consideration, 20);
    record(&work_dir, "visit-b", "greenfield", FunnelStage::DecisionYes, 3);
    record(&work_dir, "visit-c", "riverside", FunnelStage::Interest, 30);
    record(&work_dir, "visit-d", "riverside", FunnelStage::Consideration, 10);

    (temp_dir, work_dir)
}

#[test]
fn test_report_summarises_every_school() {
    let (_temp_dir, work_dir) = setup();
    let report = build_report(&work_dir, &ReportArgs::default(), as_of()).unwrap();

    assert_eq!(report.stats.total, 3);
    assert_eq!(report.stats.closed_won, 1);
    assert_eq!(report.stats.closed_lost, 0);
    assert_eq!(report.stats.in_progress, 2);

    let counts: Vec<usize> = report.breakdown.iter().map(|c| c.count).collect();
    assert_eq!(counts, vec![1, 0, 0, 1, 1, 0]);

    let riverside = report
        .schools
        .iter()
        .find(|r| r.school_id == "riverside")
        .unwrap();
    assert_eq!(riverside.current_stage, FunnelStage::Consideration);
    assert_eq!(riverside.total_visits, 2);
    assert_eq!(riverside.days_in_stage, 10);
    assert_eq!(riverside.staleness, Staleness::Aging);

    let hillcrest = report
        .schools
        .iter()
        .find(|r| r.school_id == "hillcrest")
        .unwrap();
    assert_eq!(hillcrest.current_stage, FunnelStage::Awareness);
    assert_eq!(hillcrest.total_visits, 0);
    assert_eq!(hillcrest.last_activity, None);
}

#[test]
fn test_employee_viewer_sees_only_assigned_schools() {
    let (_temp_dir, work_dir) = setup();
    let args = ReportArgs {
        role: Some(Role::Employee),
        viewer: Some("emp-2".to_string()),
        employee: Some("emp-1".to_string()),
        ..ReportArgs::default()
    };

    let report = build_report(&work_dir, &args, as_of()).unwrap();
    let ids: Vec<&str> = report.schools.iter().map(|r| r.school_id.as_str()).collect();
    assert_eq!(ids, vec!["riverside"]);
    assert_eq!(report.stats.total, 1);
}

#[test]
fn test_employee_role_requires_viewer() {
    let (_temp_dir, work_dir) = setup();
    let args = ReportArgs {
        role: Some(Role::Employee),
        ..ReportArgs::default()
    };
    assert!(build_report(&work_dir, &args, as_of()).is_err());
}

#[test]
fn test_admin_filters_by_stage_and_search() {
    let (_temp_dir, work_dir) = setup();

    let args = ReportArgs {
        role: Some(Role::SuperAdmin),
        stage: Some(FunnelStage::DecisionYes),
        ..ReportArgs::default()
    };
    let report = build_report(&work_dir, &args, as_of()).unwrap();
    assert_eq!(report.schools.len(), 1);
    assert_eq!(report.schools[0].school_id, "greenfield");
    assert_eq!(report.stats.conversion_rate, 100.0);

    let args = ReportArgs {
        search: Some("academy".to_string()),
        ..ReportArgs::default()
    };
    let report = build_report(&work_dir, &args, as_of()).unwrap();
    assert_eq!(report.schools.len(), 1);
    assert_eq!(report.schools[0].school_id, "riverside");
}

#[test]
fn test_config_thresholds_change_staleness() {
    let (temp_dir, work_dir) = setup();
    fs::write(
        temp_dir.path().join(".funnel").join("config.toml"),
        "[report]\nfresh_days = 14\naging_days = 30\n",
    )
    .unwrap();

    let report = build_report(&work_dir, &ReportArgs::default(), as_of()).unwrap();
    let riverside = report
        .schools
        .iter()
        .find(|r| r.school_id == "riverside")
        .unwrap();
    assert_eq!(riverside.staleness, Staleness::Fresh);
}

#[test]
fn test_export_tables() {
    let (_temp_dir, work_dir) = setup();
    let report = build_report(&work_dir, &ReportArgs::default(), as_of()).unwrap();

    let progress = funnel_progress_table(&report.schools);
    assert_eq!(progress.rows.len(), 3);
    assert_eq!(progress.cell(0, "currentStage"), Some("Decision - Yes"));

    let schools = load_schools(&work_dir).unwrap();
    let interactions = list_interactions(&work_dir).unwrap();
    let visits = visit_history_table(&interactions, &schools);
    assert_eq!(visits.rows.len(), 4);
    assert_eq!(visits.cell(0, "schoolName"), Some("Greenfield High School"));
    assert_eq!(visits.cell(0, "funnelStage"), Some("Decision - Yes"));

    let json = serde_json::to_value(&visits).unwrap();
    assert_eq!(json["columns"][0]["key"], "date");
}

#[test]
fn test_assigned_employee_sees_school_in_report() {
    let (temp_dir, work_dir) = setup();
    let args = ReportArgs {
        role: Some(Role::Employee),
        viewer: Some("emp-3".to_string()),
        ..ReportArgs::default()
    };

    let report = build_report(&work_dir, &args, as_of()).unwrap();
    assert!(report.schools.is_empty());

    school_cmd::assign(temp_dir.path(), "hillcrest", "emp-3").expect("Should assign school");

    let report = build_report(&work_dir, &args, as_of()).unwrap();
    let ids: Vec<&str> = report.schools.iter().map(|r| r.school_id.as_str()).collect();
    assert_eq!(ids, vec!["hillcrest"]);

    let hillcrest = &load_schools(&work_dir).unwrap()[2];
    assert_eq!(hillcrest.assigned_employees, vec!["emp-1", "emp-3"]);
}
