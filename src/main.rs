mod api;
mod board;
mod cli;
mod commands;
mod config;
mod error;
mod model;
mod session;
mod validate;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use model::TaskStatus;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "tugas", about = "Course and task tracking from the terminal")]
struct Args {
    #[arg(long, env = "TUGAS_API_URL", help = "Backend base URL (overrides config)")]
    api_url: Option<String>,

    #[arg(long, help = "Config file path")]
    config: Option<PathBuf>,

    #[arg(
        long,
        env = "TUGAS_DATA_DIR",
        help = "Directory holding the stored session (default: ~/.tugas)"
    )]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Verbose output (debug-level logging)")]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Log in with an email or username
    Login {
        identifier: String,
        #[arg(long, env = "TUGAS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create a new account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "TUGAS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out and clear the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Manage courses
    Course {
        #[command(subcommand)]
        action: CourseAction,
    },
    /// Manage tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Show the kanban board
    Board,
}

#[derive(Subcommand)]
enum CourseAction {
    /// List courses
    List,
    /// Show one course
    Show { id: String },
    /// Add a course
    Add {
        name: String,
        #[arg(long, help = "Credit load (1-6)")]
        sks: u8,
        #[arg(long)]
        description: Option<String>,
    },
    /// Edit a course
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        sks: Option<u8>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a course
    Rm { id: String },
}

#[derive(Subcommand)]
enum TaskAction {
    /// List tasks
    List {
        #[arg(long, help = "Filter by course id or name")]
        course: Option<String>,
        #[arg(long, help = "Filter by status")]
        status: Option<TaskStatus>,
    },
    /// Show one task
    Show { id: String },
    /// Add a task
    Add {
        name: String,
        #[arg(long, help = "Course id")]
        course: String,
        #[arg(long, help = "Due date (YYYY-MM-DD)")]
        deadline: NaiveDate,
        #[arg(long)]
        description: Option<String>,
    },
    /// Edit a task
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, help = "Course id")]
        course: Option<String>,
        #[arg(long, help = "Due date (YYYY-MM-DD)")]
        deadline: Option<NaiveDate>,
        #[arg(long)]
        status: Option<TaskStatus>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a task
    Rm { id: String },
    /// Move a task to another status column
    Move { id: String, status: TaskStatus },
}

/// Prints the re-login hint when the gateway drops the session.
struct CliEvents;

impl api::SessionEvents for CliEvents {
    fn session_invalidated(&self) {
        eprintln!("Session expired. Please login again (tugas login <email-or-username>).");
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = match &args.config {
        Some(path) => config::Config::load_from(path)?,
        None => config::Config::load()?,
    };
    if let Err(errors) = config.validate() {
        for err in &errors {
            eprintln!("config error {err}");
        }
        anyhow::bail!("invalid configuration");
    }

    let base_url = args
        .api_url
        .clone()
        .unwrap_or_else(|| config.api.base_url.clone());

    let data_dir = args
        .data_dir
        .clone()
        .or_else(|| dirs::home_dir().map(|home| home.join(".tugas")))
        .ok_or_else(|| anyhow::anyhow!("cannot determine a home directory; pass --data-dir"))?;

    let store = session::SessionStore::new(&data_dir);
    let client = api::Client::new(
        &base_url,
        Duration::from_secs(config.api.timeout_secs),
        store,
        Box::new(CliEvents),
    );

    match args.command {
        Some(command) => run_command(&client, command),
        None => cli::run_repl(&client),
    }
}

fn run_command(client: &api::Client, command: Command) -> Result<()> {
    match command {
        Command::Login { identifier, password } => {
            commands::login(client, &identifier, &password)
        }
        Command::Register {
            name,
            username,
            email,
            password,
        } => commands::register(client, &name, &username, &email, &password),
        Command::Logout => commands::logout(client),
        Command::Whoami => commands::whoami(client),
        Command::Board => commands::show_board(client),
        Command::Course { action } => match action {
            CourseAction::List => commands::course_list(client),
            CourseAction::Show { id } => commands::course_show(client, &id),
            CourseAction::Add {
                name,
                sks,
                description,
            } => commands::course_add(client, &name, sks, description.as_deref()),
            CourseAction::Edit {
                id,
                name,
                sks,
                description,
            } => commands::course_edit(client, &id, name.as_deref(), sks, description.as_deref()),
            CourseAction::Rm { id } => commands::course_rm(client, &id),
        },
        Command::Task { action } => match action {
            TaskAction::List { course, status } => {
                commands::task_list(client, course.as_deref(), status)
            }
            TaskAction::Show { id } => commands::task_show(client, &id),
            TaskAction::Add {
                name,
                course,
                deadline,
                description,
            } => commands::task_add(client, &name, &course, deadline, description.as_deref()),
            TaskAction::Edit {
                id,
                name,
                course,
                deadline,
                status,
                description,
            } => commands::task_edit(
                client,
                &id,
                name.as_deref(),
                course.as_deref(),
                deadline,
                status,
                description.as_deref(),
            ),
            TaskAction::Rm { id } => commands::task_rm(client, &id),
            TaskAction::Move { id, status } => commands::task_move(client, &id, status),
        },
    }
}
