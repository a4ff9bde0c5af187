use common::{AuthState, Role};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::edit::CancelPolicy;

pub const DEFAULT_CONFIG_FILE: &str = "myjobs.toml";

/// Client settings. Read from `myjobs.toml` (optional) and then from
/// `MYJOBS__SECTION__KEY` environment variables, e.g.
/// `MYJOBS__API__BASE_URL=http://localhost:4000`.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub edit: EditConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Session token sent as a cookie with every request.
    pub token: Option<String>,
    pub cookie_name: String,
    /// No timeout unless set.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".to_string(),
            token: None,
            cookie_name: "token".to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    pub role: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            role: Some(Role::Employer.to_string()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct EditConfig {
    /// Restore the pre-edit record when edit mode is left without saving.
    pub revert_unsaved_on_cancel: bool,
}

impl ClientConfig {
    /// Loads `path`, or `myjobs.toml` in the working directory when no
    /// path is given. Only an explicitly named file is required to exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (file, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let config = Config::builder()
            .add_source(File::from(file).required(required))
            .add_source(
                Environment::with_prefix("MYJOBS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Session as seen by the view: signed in when a token is configured.
    pub fn auth_state(&self) -> AuthState {
        AuthState {
            is_authorized: self.api.token.is_some(),
            user: self.session.role.clone().map(|role| common::User {
                role: Role::from(role),
            }),
        }
    }

    pub fn cancel_policy(&self) -> CancelPolicy {
        if self.edit.revert_unsaved_on_cancel {
            CancelPolicy::Revert
        } else {
            CancelPolicy::Keep
        }
    }
}
