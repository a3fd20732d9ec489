//! Build the web assets and upload them to UpYun.
//!
//! Reads `UPYUN_SERVICE_NAME`, `UPYUN_OPERATOR_NAME`, `UPYUN_OPERATOR_PASSWORD`
//! and optionally `UPYUN_REMOTE_PATH` from the environment or a `.env` file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use etiquette_quiz::deploy::{
    DEFAULT_BUILD_COMMAND, DEFAULT_OUTPUT_ROOT, ShellBuild, deploy_from_env,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory the build writes its output to
    #[arg(long, default_value = DEFAULT_OUTPUT_ROOT)]
    dist: PathBuf,

    /// Command that builds the web assets
    #[arg(long, default_value = DEFAULT_BUILD_COMMAND)]
    build_command: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the variables may already be set.
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    match deploy_from_env(args.dist, ShellBuild::new(args.build_command)).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) if e.is_fatal() => {
            error!(stage = %e.stage(), "{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Unexpected error: {}", e);
            ExitCode::SUCCESS
        }
    }
}
