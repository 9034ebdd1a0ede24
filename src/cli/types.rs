use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use funnel::commands::export::ExportKind;
use funnel::models::role::Role;
use funnel::models::stage::FunnelStage;
use funnel::validation::{
    clap_comments_validator, clap_date_parser, clap_id_validator, clap_role_parser,
    clap_stage_parser, clap_time_parser,
};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "
   ┌─────────┐
    \\       /   funnel
     \\_____/
       │ │

{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}";

#[derive(Parser)]
#[command(name = "funnel")]
#[command(about = "School partnership funnel tracking CLI", long_about = None)]
#[command(version)]
#[command(help_template = HELP_TEMPLATE)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// Directory containing the .funnel/ store
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize .funnel/ directory
    Init,

    /// List funnel stages in pipeline order
    Stages,

    /// List next-step options for a stage
    Options {
        /// Stage value, e.g. awareness or decision_yes
        #[arg(value_parser = clap_stage_parser)]
        stage: FunnelStage,
    },

    /// Check whether a next step is valid at a stage
    Check {
        #[arg(value_parser = clap_stage_parser)]
        stage: FunnelStage,

        /// Next-step action, matched exactly
        action: String,
    },

    /// Manage schools
    School {
        #[command(subcommand)]
        command: SchoolCommands,
    },

    /// Log a school visit
    Log {
        /// School ID
        #[arg(value_parser = clap_id_validator)]
        school_id: String,

        /// Employee who made the visit
        #[arg(short, long, value_parser = clap_id_validator)]
        employee: String,

        /// Funnel stage observed at the visit
        #[arg(short, long, value_parser = clap_stage_parser)]
        stage: FunnelStage,

        /// Next-step action from the stage's catalog
        #[arg(short, long)]
        action: String,

        /// Visit comments
        #[arg(short, long, value_parser = clap_comments_validator)]
        comments: String,

        /// Next step date (YYYY-MM-DD)
        #[arg(long = "on", value_parser = clap_date_parser)]
        schedule_date: NaiveDate,

        /// Next step time (HH:MM)
        #[arg(long = "at", value_parser = clap_time_parser)]
        schedule_time: NaiveTime,

        /// Visit date, defaults to today
        #[arg(long, value_parser = clap_date_parser)]
        date: Option<NaiveDate>,

        /// Visit time, defaults to now
        #[arg(long, value_parser = clap_time_parser)]
        time: Option<NaiveTime>,
    },

    /// Edit a logged visit
    Edit {
        /// Interaction ID
        #[arg(value_parser = clap_id_validator)]
        id: String,

        #[arg(short, long, value_parser = clap_stage_parser)]
        stage: Option<FunnelStage>,

        #[arg(short, long)]
        action: Option<String>,

        #[arg(short, long, value_parser = clap_comments_validator)]
        comments: Option<String>,

        #[arg(long = "on", value_parser = clap_date_parser)]
        schedule_date: Option<NaiveDate>,

        #[arg(long = "at", value_parser = clap_time_parser)]
        schedule_time: Option<NaiveTime>,
    },

    /// Show visit history for a school
    History {
        #[arg(value_parser = clap_id_validator)]
        school_id: String,
    },

    /// Show the funnel dashboard
    Report {
        /// Case-insensitive match on school name or employee ID
        #[arg(long)]
        search: Option<String>,

        #[arg(short, long, value_parser = clap_stage_parser)]
        stage: Option<FunnelStage>,

        /// Only schools assigned to this employee
        #[arg(short, long, value_parser = clap_id_validator)]
        employee: Option<String>,

        /// Viewing role (super_admin, it_support, employee)
        #[arg(long, value_parser = clap_role_parser)]
        role: Option<Role>,

        /// Viewing employee ID, required for non-admin roles
        #[arg(long, value_parser = clap_id_validator)]
        viewer: Option<String>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Export report data as JSON
    Export {
        #[arg(value_enum)]
        kind: ExportKind,
    },
}

#[derive(Subcommand)]
pub enum SchoolCommands {
    /// Add a school
    Add {
        #[arg(value_parser = clap_id_validator)]
        id: String,

        /// Display name
        name: String,

        /// Assigned employee (repeatable)
        #[arg(short, long = "employee", value_parser = clap_id_validator)]
        employees: Vec<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        principal: Option<String>,

        #[arg(long)]
        students: Option<u32>,
    },

    /// Assign an employee to an existing school
    Assign {
        #[arg(value_parser = clap_id_validator)]
        school_id: String,

        #[arg(value_parser = clap_id_validator)]
        employee_id: String,
    },

    /// List schools with their current stage
    List,
}
