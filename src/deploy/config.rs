use std::env;
use std::fmt;

use thiserror::Error;

pub const SERVICE_NAME_VAR: &str = "UPYUN_SERVICE_NAME";
pub const OPERATOR_NAME_VAR: &str = "UPYUN_OPERATOR_NAME";
pub const OPERATOR_PASSWORD_VAR: &str = "UPYUN_OPERATOR_PASSWORD";
pub const REMOTE_PATH_VAR: &str = "UPYUN_REMOTE_PATH";
pub const API_ENDPOINT_VAR: &str = "UPYUN_API_ENDPOINT";

pub const DEFAULT_REMOTE_PREFIX: &str = "/";
pub const DEFAULT_API_ENDPOINT: &str = "https://v0.api.upyun.com";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

/// Account used to authenticate against the storage service.
#[derive(Clone, PartialEq, Eq)]
pub struct UpyunCredentials {
    pub service: String,
    pub operator: String,
    pub password: String,
}

impl fmt::Debug for UpyunCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpyunCredentials")
            .field("service", &self.service)
            .field("operator", &self.operator)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Deploy configuration, read once at startup and passed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub credentials: UpyunCredentials,
    pub remote_prefix: String,
    pub endpoint: String,
}

impl DeployConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let service = read(SERVICE_NAME_VAR);
        let operator = read(OPERATOR_NAME_VAR);
        let password = read(OPERATOR_PASSWORD_VAR);

        match (service, operator, password) {
            (Some(service), Some(operator), Some(password)) => Ok(Self {
                credentials: UpyunCredentials {
                    service,
                    operator,
                    password,
                },
                remote_prefix: read(REMOTE_PATH_VAR)
                    .unwrap_or_else(|| DEFAULT_REMOTE_PREFIX.to_string()),
                endpoint: read(API_ENDPOINT_VAR)
                    .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string()),
            }),
            (service, operator, password) => {
                let missing = [
                    (SERVICE_NAME_VAR, service.is_none()),
                    (OPERATOR_NAME_VAR, operator.is_none()),
                    (OPERATOR_PASSWORD_VAR, password.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(ConfigError::Missing(missing))
            }
        }
    }
}
