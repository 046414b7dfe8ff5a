//! `attendance` command-line front end.
//!
//! # Responsibility
//! - Parse arguments, resolve configuration and bootstrap logging.
//! - Own the one database connection for the lifetime of the process and
//!   hand it to the core service.

mod commands;
mod config;
mod view;

use anyhow::{Context as _, Result};
use attendance_core::db::open_db;
use attendance_core::{
    init_logging, AttendanceForm, AttendanceService, RecordId, SqliteAttendanceRepository,
    DATE_FORMAT,
};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use commands::Outcome;
use config::{ConfigSources, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
use log::{error, info};
use std::io;
use std::process::ExitCode;

const DB_ARG: &str = "db";
const LOG_DIR_ARG: &str = "log-dir";
const LOG_LEVEL_ARG: &str = "log-level";

const NAME_ARG: &str = "name";
const ROLL_ARG: &str = "roll";
const DATE_ARG: &str = "date";
const SUBJECT_ARG: &str = "subject";
const ID_ARG: &str = "id";
const YES_ARG: &str = "yes";
const JSON_ARG: &str = "json";

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    match run(&matches) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            error!("event=command module=cli status=error error={err}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_command() -> Command {
    Command::new("attendance")
        .about("Record, list and delete student attendance entries")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(DB_ARG)
                .long(DB_ARG)
                .global(true)
                .value_name("PATH")
                .help(format!("SQLite database file [{DB_PATH_ENV}]")),
        )
        .arg(
            Arg::new(LOG_DIR_ARG)
                .long(LOG_DIR_ARG)
                .global(true)
                .value_name("DIR")
                .help(format!("Directory for rolling log files [{LOG_DIR_ENV}]")),
        )
        .arg(
            Arg::new(LOG_LEVEL_ARG)
                .long(LOG_LEVEL_ARG)
                .global(true)
                .value_name("LEVEL")
                .help(format!(
                    "Log level: trace|debug|info|warn|error [{LOG_LEVEL_ENV}]"
                )),
        )
        .subcommand(
            Command::new("add")
                .about("Submit an attendance entry")
                .arg(Arg::new(NAME_ARG).long(NAME_ARG).short('n').help("Student name"))
                .arg(Arg::new(ROLL_ARG).long(ROLL_ARG).short('r').help("Roll number"))
                .arg(
                    Arg::new(DATE_ARG)
                        .long(DATE_ARG)
                        .short('d')
                        .help("Attendance date as YYYY-MM-DD [default: today]"),
                )
                .arg(
                    Arg::new(SUBJECT_ARG)
                        .long(SUBJECT_ARG)
                        .short('s')
                        .action(ArgAction::Append)
                        .value_delimiter(',')
                        .help("Attended subject; repeat or separate with commas"),
                ),
        )
        .subcommand(
            Command::new("list").about("Show all attendance entries").arg(
                Arg::new(JSON_ARG)
                    .long(JSON_ARG)
                    .action(ArgAction::SetTrue)
                    .help("Print entries as a JSON array"),
            ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete one attendance entry by id")
                .arg(
                    Arg::new(ID_ARG)
                        .required(true)
                        .value_parser(value_parser!(i64))
                        .help("Entry id as shown by `list`"),
                )
                .arg(
                    Arg::new(YES_ARG)
                        .long(YES_ARG)
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Do not ask for confirmation"),
                ),
        )
        .subcommand(Command::new("subjects").about("List selectable subjects"))
}

fn run(matches: &ArgMatches) -> Result<Outcome> {
    let (subcommand, sub_matches) = matches
        .subcommand()
        .context("a subcommand is required")?;
    let mut stdout = io::stdout().lock();

    if subcommand == "subjects" {
        return commands::subjects(&mut stdout);
    }

    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let config = ConfigSources {
        db_flag: sub_matches.get_one::<String>(DB_ARG).cloned(),
        log_dir_flag: sub_matches.get_one::<String>(LOG_DIR_ARG).cloned(),
        log_level_flag: sub_matches.get_one::<String>(LOG_LEVEL_ARG).cloned(),
        ..ConfigSources::default()
    }
    .with_process_env()
    .resolve(&cwd);

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }
    info!("event=command module=cli status=start command={subcommand}");

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    let repo = SqliteAttendanceRepository::try_new(&conn)?;
    let service = AttendanceService::new(repo);
    let mut stderr = io::stderr().lock();

    let outcome = match subcommand {
        "add" => {
            let form = form_from_matches(sub_matches);
            commands::add(&service, &form, &mut stdout, &mut stderr)?
        }
        "list" => commands::list(&service, sub_matches.get_flag(JSON_ARG), &mut stdout)?,
        "delete" => {
            let id = sub_matches
                .get_one::<i64>(ID_ARG)
                .copied()
                .context("missing entry id")?;
            commands::delete(
                &service,
                RecordId::new(id),
                sub_matches.get_flag(YES_ARG),
                &mut io::stdin().lock(),
                &mut stdout,
                &mut stderr,
            )?
        }
        other => anyhow::bail!("unknown subcommand `{other}`"),
    };

    info!("event=command module=cli status=ok command={subcommand} outcome={outcome:?}");
    Ok(outcome)
}

fn form_from_matches(matches: &ArgMatches) -> AttendanceForm {
    let text = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();
    let date = matches
        .get_one::<String>(DATE_ARG)
        .cloned()
        .unwrap_or_else(|| chrono::Local::now().date_naive().format(DATE_FORMAT).to_string());

    AttendanceForm {
        name: text(NAME_ARG),
        roll_no: text(ROLL_ARG),
        date,
        subjects: matches
            .get_many::<String>(SUBJECT_ARG)
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
    }
}
