//! Build the web assets and push them to UpYun.
//!
//! A deploy is a single linear run:
//! `ValidatingConfig → Building → EnumeratingFiles → Uploading → Reporting → Done`.
//! Only config, build and the output-root check can fail the run; a file that
//! fails to upload is logged, counted and skipped.

mod build;
mod config;
mod storage;
mod upload;
mod walk;

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

pub use build::{BuildError, BuildStep, DEFAULT_BUILD_COMMAND, ShellBuild};
pub use config::{
    API_ENDPOINT_VAR, ConfigError, DEFAULT_REMOTE_PREFIX, DeployConfig, OPERATOR_NAME_VAR,
    OPERATOR_PASSWORD_VAR, REMOTE_PATH_VAR, SERVICE_NAME_VAR, UpyunCredentials,
};
pub use storage::{PutOutcome, StorageClient, StorageError, UpyunClient};
pub use upload::{UploadTally, upload_all};
pub use walk::{UploadUnit, collect_upload_units, join_remote};

pub const DEFAULT_OUTPUT_ROOT: &str = "dist";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployStage {
    ValidatingConfig,
    Building,
    EnumeratingFiles,
    Uploading,
    Reporting,
    Done,
}

impl fmt::Display for DeployStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeployStage::ValidatingConfig => "validating-config",
            DeployStage::Building => "building",
            DeployStage::EnumeratingFiles => "enumerating-files",
            DeployStage::Uploading => "uploading",
            DeployStage::Reporting => "reporting",
            DeployStage::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum DeployError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Client(StorageError),
    #[error("build failed: {0}")]
    Build(#[from] BuildError),
    #[error("output directory not found at {}", .0.display())]
    OutputDirMissing(PathBuf),
    #[error("failed to enumerate output files: {0}")]
    Enumerate(#[from] walkdir::Error),
}

impl DeployError {
    /// Fatal errors end the process with a non-zero status. Anything else
    /// surfaced after the upload stage began is only logged.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, DeployError::Enumerate(_))
    }

    pub fn stage(&self) -> DeployStage {
        match self {
            DeployError::Config(_) | DeployError::Client(_) => DeployStage::ValidatingConfig,
            DeployError::Build(_) => DeployStage::Building,
            DeployError::OutputDirMissing(_) | DeployError::Enumerate(_) => {
                DeployStage::EnumeratingFiles
            }
        }
    }
}

fn enter(stage: DeployStage) {
    info!(%stage, "entering stage");
}

/// Runs the build and uploads its output through a storage client.
pub struct Deployer<B, S> {
    output_root: PathBuf,
    remote_prefix: String,
    build: B,
    storage: S,
}

impl<B, S> Deployer<B, S>
where
    B: BuildStep,
    S: StorageClient,
{
    pub fn new(
        output_root: impl Into<PathBuf>,
        remote_prefix: impl Into<String>,
        build: B,
        storage: S,
    ) -> Self {
        Self {
            output_root: output_root.into(),
            remote_prefix: remote_prefix.into(),
            build,
            storage,
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Build, enumerate and upload. Returns the per-file tally.
    pub async fn run(&self) -> Result<UploadTally, DeployError> {
        enter(DeployStage::Building);
        info!("Starting build...");
        self.build.build().await?;
        info!("Build successful");

        enter(DeployStage::EnumeratingFiles);
        if !self.output_root.is_dir() {
            return Err(DeployError::OutputDirMissing(self.output_root.clone()));
        }
        let root = std::path::absolute(&self.output_root)
            .map_err(|_| DeployError::OutputDirMissing(self.output_root.clone()))?;
        let units = collect_upload_units(&root, &self.remote_prefix)?;
        info!("Found {} files to upload", units.len());

        enter(DeployStage::Uploading);
        let tally = upload_all(&units, &self.storage).await;

        enter(DeployStage::Reporting);
        info!("Deployment finished");
        info!("Attempted: {}", tally.attempted());
        info!("Success: {}", tally.succeeded);
        if tally.failed > 0 {
            info!("Failed: {}", tally.failed);
        }

        enter(DeployStage::Done);
        Ok(tally)
    }
}

/// Validate configuration from the environment, then deploy `output_root`
/// to UpYun.
pub async fn deploy_from_env<B: BuildStep>(
    output_root: impl Into<PathBuf>,
    build: B,
) -> Result<UploadTally, DeployError> {
    deploy_with_lookup(|name| std::env::var(name).ok(), output_root, build).await
}

/// Like [`deploy_from_env`], reading configuration through `lookup`.
///
/// Configuration is validated before the build starts; a missing value
/// returns [`DeployError::Config`] without running anything.
pub async fn deploy_with_lookup<F, B>(
    lookup: F,
    output_root: impl Into<PathBuf>,
    build: B,
) -> Result<UploadTally, DeployError>
where
    F: Fn(&str) -> Option<String>,
    B: BuildStep,
{
    enter(DeployStage::ValidatingConfig);
    let config = DeployConfig::from_lookup(lookup)?;
    let storage = UpyunClient::new(&config).map_err(DeployError::Client)?;

    info!(
        service = %config.credentials.service,
        prefix = %config.remote_prefix,
        "Deploying to UpYun"
    );

    let deployer = Deployer::new(output_root, config.remote_prefix.clone(), build, storage);
    deployer.run().await
}
