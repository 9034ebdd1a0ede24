use anyhow::Result;
use funnel::commands::edit::EditArgs;
use funnel::commands::log::LogArgs;
use funnel::commands::report::ReportArgs;
use funnel::commands::school::SchoolArgs;
use funnel::commands::{edit, export, history, init, log, report, school, stages};

use super::types::{Cli, Commands, SchoolCommands};

pub fn dispatch(cli: Cli) -> Result<()> {
    let base = cli.dir.as_path();

    match cli.command {
        Commands::Init => init::execute(base),
        Commands::Stages => stages::list(),
        Commands::Options { stage } => stages::options(stage),
        Commands::Check { stage, action } => stages::check(stage, &action),
        Commands::School { command } => match command {
            SchoolCommands::Add {
                id,
                name,
                employees,
                address,
                principal,
                students,
            } => school::add(
                base,
                SchoolArgs {
                    id,
                    name,
                    employees,
                    address,
                    principal,
                    students,
                },
            ),
            SchoolCommands::Assign {
                school_id,
                employee_id,
            } => school::assign(base, &school_id, &employee_id),
            SchoolCommands::List => school::list(base),
        },
        Commands::Log {
            school_id,
            employee,
            stage,
            action,
            comments,
            schedule_date,
            schedule_time,
            date,
            time,
        } => log::execute(
            base,
            LogArgs {
                school_id,
                employee_id: employee,
                stage,
                action,
                comments,
                schedule_date,
                schedule_time,
                visit_date: date,
                visit_time: time,
            },
        )
        .map(|_| ()),
        Commands::Edit {
            id,
            stage,
            action,
            comments,
            schedule_date,
            schedule_time,
        } => edit::execute(
            base,
            &id,
            EditArgs {
                stage,
                action,
                comments,
                schedule_date,
                schedule_time,
            },
        )
        .map(|_| ()),
        Commands::History { school_id } => history::execute(base, &school_id),
        Commands::Report {
            search,
            stage,
            employee,
            role,
            viewer,
            json,
        } => report::execute(
            base,
            ReportArgs {
                search,
                stage,
                employee,
                role,
                viewer,
                json,
            },
        ),
        Commands::Export { kind } => export::execute(base, kind),
    }
}
