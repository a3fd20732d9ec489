use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

pub const DEFAULT_BUILD_COMMAND: &str = "npm run build";

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to start build command `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("build command `{command}` exited with {}", describe_code(.code))]
    Failed { command: String, code: Option<i32> },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Produces the static assets that get uploaded.
#[async_trait]
pub trait BuildStep: Send + Sync {
    async fn build(&self) -> Result<(), BuildError>;
}

/// Runs a command line through the platform shell, passing its output
/// straight through to the operator.
#[derive(Debug, Clone)]
pub struct ShellBuild {
    command: String,
}

impl ShellBuild {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn shell_command(&self) -> Command {
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C");
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c");
            cmd
        };
        cmd.arg(&self.command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }
}

impl Default for ShellBuild {
    fn default() -> Self {
        Self::new(DEFAULT_BUILD_COMMAND)
    }
}

#[async_trait]
impl BuildStep for ShellBuild {
    async fn build(&self) -> Result<(), BuildError> {
        debug!("Executing build command: {}", self.command);

        let status = self
            .shell_command()
            .status()
            .await
            .map_err(|source| BuildError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(BuildError::Failed {
                command: self.command.clone(),
                code: status.code(),
            });
        }

        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_command() {
        assert!(ShellBuild::new("true").build().await.is_ok());
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_reported() {
        let err = ShellBuild::new("exit 3").build().await.unwrap_err();
        match err {
            BuildError::Failed { code, .. } => assert_eq!(code, Some(3)),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_program_fails() {
        let err = ShellBuild::new("definitely-not-a-real-build-tool-xyz")
            .build()
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::Failed { .. }));
    }
}
