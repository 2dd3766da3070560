//! `projecthub`: command-line client for the ProjectHub backend.
//!
//! Runs the same session core as the web UI. The session is hydrated from
//! `<state-dir>/session.json` at startup, `login` writes it through and
//! `logout` clears it; every other command sends the stored bearer token.

mod store;
mod transport;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use session::{
    ApiClient, ApiError, GuardDecision, NewProject, NewTask, SessionError, SessionStore, StorageError, TaskStatus,
    ValidationError, decide, register, validate,
};

use crate::store::FileStore;
use crate::transport::ReqwestTransport;

type Api = ApiClient<ReqwestTransport, FileStore>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not signed in; run `projecthub login` first")]
    NotSignedIn,
    #[error("no state directory; pass --state-dir or set PROJECTHUB_STATE_DIR")]
    NoStateDir,
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid JSON output: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "projecthub", about = "ProjectHub projects and tasks CLI")]
struct Cli {
    #[arg(long, env = "PROJECTHUB_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,

    /// Directory holding `session.json`; defaults to the platform data dir.
    #[arg(long, env = "PROJECTHUB_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Log requests and session transitions to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PROJECTHUB_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account. Does not sign in.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "PROJECTHUB_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    Projects(ProjectsCommand),
    Tasks(TasksCommand),
}

#[derive(Args, Debug)]
struct ProjectsCommand {
    #[command(subcommand)]
    command: ProjectsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProjectsSubcommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Show {
        project_id: String,
    },
}

#[derive(Args, Debug)]
struct TasksCommand {
    #[command(subcommand)]
    command: TasksSubcommand,
}

#[derive(Subcommand, Debug)]
enum TasksSubcommand {
    List {
        project_id: String,
    },
    Create {
        project_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "todo", value_parser = parse_status)]
        status: TaskStatus,
    },
}

fn parse_status(raw: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(raw).ok_or_else(|| {
        let expected: Vec<_> = TaskStatus::ALL.iter().map(|s| s.as_str()).collect();
        format!("expected one of {}", expected.join(", "))
    })
}

fn default_state_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "projecthub").map(|dirs| dirs.data_dir().to_path_buf())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let state_dir = cli.state_dir.or_else(default_state_dir).ok_or(CliError::NoStateDir)?;
    let storage = FileStore::in_dir(&state_dir);
    tracing::debug!(path = %storage.path().display(), "session file");

    let mut session = SessionStore::hydrated(storage.clone());
    let api = ApiClient::new(cli.base_url, ReqwestTransport::new(), storage);

    run(cli.command, &mut session, &api).await
}

async fn run(command: Command, session: &mut SessionStore<FileStore>, api: &Api) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            let user = session.log_in(api, &email, &password).await?;
            println!("signed in as {}", user.username);
            Ok(())
        }
        Command::Register { username, email, password } => {
            register(api, &username, &email, &password).await?;
            println!("account created; run `projecthub login --email {}`", email.trim());
            Ok(())
        }
        Command::Logout => {
            session.log_out();
            println!("signed out");
            Ok(())
        }
        Command::Whoami => {
            require_session(session)?;
            print_json(&session.user())
        }
        Command::Projects(projects) => {
            require_session(session)?;
            run_projects(api, projects).await
        }
        Command::Tasks(tasks) => {
            require_session(session)?;
            run_tasks(api, tasks).await
        }
    }
}

/// Protected commands follow the same guard as protected pages.
fn require_session(session: &SessionStore<FileStore>) -> Result<(), CliError> {
    match decide(session.state()) {
        GuardDecision::Render => Ok(()),
        GuardDecision::Pending | GuardDecision::Redirect(_) => Err(CliError::NotSignedIn),
    }
}

async fn run_projects(api: &Api, projects: ProjectsCommand) -> Result<(), CliError> {
    match projects.command {
        ProjectsSubcommand::List => print_json(&api.list_projects().await?),
        ProjectsSubcommand::Create { name, description } => {
            let project = NewProject {
                name: validate::required("Project name", &name)?,
                description: description.trim().to_owned(),
            };
            print_json(&api.create_project(&project).await?)
        }
        ProjectsSubcommand::Show { project_id } => {
            let project = api.get_project(&project_id).await?;
            let tasks = api.list_tasks(&project_id).await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "task fetch failed");
                Vec::new()
            });
            print_json(&serde_json::json!({ "project": project, "tasks": tasks }))
        }
    }
}

async fn run_tasks(api: &Api, tasks: TasksCommand) -> Result<(), CliError> {
    match tasks.command {
        TasksSubcommand::List { project_id } => print_json(&api.list_tasks(&project_id).await?),
        TasksSubcommand::Create { project_id, title, description, status } => {
            let task = NewTask {
                title: validate::required("Title", &title)?,
                description: validate::required("Description", &description)?,
                status,
            };
            print_json(&api.create_task(&project_id, &task).await?)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
