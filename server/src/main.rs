//! MyJobs reference server
//!
//! Loads seed jobs from a JSON file and serves the employer job endpoints
//! with Axum.

use clap::Parser;
use server::AppState;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:4000")]
    addr: String,

    /// Seed file with a JSON array of jobs
    #[arg(long, default_value = "data/jobs.json")]
    data: PathBuf,

    /// Required value of the `token` session cookie; omit to accept any request
    #[arg(long, env = "MYJOBS_SERVER_TOKEN")]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let jobs = server::load_jobs(&args.data)?;
    if args.token.is_none() {
        tracing::warn!("no session token configured, every request is accepted");
    }
    let state = Arc::new(AppState::new(jobs, args.token));

    let listener = tokio::net::TcpListener::bind(&args.addr).await?;
    tracing::info!("Server running at http://{}", listener.local_addr()?);

    server::serve(listener, state).await?;
    Ok(())
}
