//! MyJobs terminal client
//!
//! Shows the signed-in employer's posted jobs and edits or deletes them
//! through the job-board API.

use anyhow::Context;
use clap::{Parser, Subcommand};
use common::{JobField, JobId};
use myjobs::render::render_page;
use myjobs::{ClientConfig, HttpJobsApi, MyJobsView, Navigator, Notifier, ViewError};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (defaults to ./myjobs.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// API base URL, e.g. http://localhost:4000
    #[arg(long)]
    base_url: Option<String>,

    /// Session token sent as the session cookie
    #[arg(long)]
    token: Option<String>,

    /// Role of the signed-in user
    #[arg(long)]
    role: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show your posted jobs
    List,
    /// Edit fields of a job and save it
    Update {
        id: String,
        /// field=value, e.g. --set title="Senior Rust Engineer"
        #[arg(long = "set", value_parser = parse_assignment, required = true)]
        set: Vec<(JobField, String)>,
    },
    /// Delete a job
    Delete { id: String },
}

fn parse_assignment(s: &str) -> Result<(JobField, String), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got `{s}`"))?;
    let field = field.trim().parse::<JobField>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn success(&self, message: &str) {
        println!("✅ {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("❌ {message}");
    }
}

struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, path: &str) {
        println!("↪️  Only employers can manage posted jobs (redirected to {path})");
    }
}

async fn apply_edits(
    view: &MyJobsView,
    id: &JobId,
    set: Vec<(JobField, String)>,
) -> Result<(), ViewError> {
    view.enable_edit(id)?;
    for (field, value) in set {
        view.set_field(id, field, value)?;
    }
    view.update(id).await
}

/// Failed requests were already shown by the notifier.
fn exit_status(outcome: &Result<(), ViewError>) -> u8 {
    match outcome {
        Ok(()) => 0,
        Err(ViewError::Request { .. } | ViewError::Discarded(_)) => 1,
        Err(e) => {
            eprintln!("❌ {e}");
            1
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ClientConfig::load(args.config.as_deref()).context("loading config")?;
    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
    }
    if let Some(token) = args.token {
        config.api.token = Some(token);
    }
    if let Some(role) = args.role {
        config.session.role = Some(role);
    }

    let api = HttpJobsApi::new(&config.api)?;
    tracing::debug!(base_url = api.base_url(), "using API");

    let view = MyJobsView::new(
        Arc::new(api),
        config.auth_state(),
        Arc::new(TerminalNotifier),
        Arc::new(TerminalNavigator),
    )
    .with_cancel_policy(config.cancel_policy());

    let mounted = view.mount().await;
    let outcome = match (mounted, args.command) {
        (Err(e), _) => Err(e),
        (Ok(()), Command::List) => Ok(()),
        (Ok(()), Command::Update { id, set }) => apply_edits(&view, &JobId::from(id), set).await,
        (Ok(()), Command::Delete { id }) => view.delete(&JobId::from(id)).await,
    };

    print!("{}", render_page(&view.page()));
    println!();
    Ok(ExitCode::from(exit_status(&outcome)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use myjobs::Operation;

    #[test]
    fn test_parse_assignment() {
        let (field, value) = parse_assignment("fixedSalary=750").unwrap();
        assert_eq!(field, JobField::FixedSalary);
        assert_eq!(value, "750");
        assert!(parse_assignment("title").is_err());
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&Ok(())), 0);
        let rejected = Err(ViewError::Request {
            op: Operation::Update,
            message: "Invalid salary".to_string(),
        });
        assert_eq!(exit_status(&rejected), 1);
        assert_eq!(exit_status(&Err(ViewError::Discarded(Operation::Fetch))), 1);
        assert_eq!(exit_status(&Err(ViewError::UnknownJob(JobId::from("9")))), 1);
    }
}
