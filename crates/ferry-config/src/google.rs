//! Google Tasks and OAuth configuration.

use serde::{Deserialize, Serialize};

fn default_client_secret_path() -> String {
    "credentials.json".to_string()
}

fn default_token_path() -> String {
    "token.json".to_string()
}

fn default_task_list() -> String {
    "General".to_string()
}

fn default_api_url() -> String {
    "https://tasks.googleapis.com/tasks/v1".to_string()
}

/// Seconds to wait for the user to finish the browser consent flow.
const fn default_consent_timeout_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleConfig {
    /// OAuth client secret downloaded from the Cloud console.
    #[serde(default = "default_client_secret_path")]
    pub client_secret_path: String,

    /// Token cache, rewritten whenever the access token is refreshed.
    #[serde(default = "default_token_path")]
    pub token_path: String,

    /// Title of the task list to mirror issues into.
    #[serde(default = "default_task_list")]
    pub task_list: String,

    /// Tasks REST API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_consent_timeout_secs")]
    pub consent_timeout_secs: u64,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_secret_path: default_client_secret_path(),
            token_path: default_token_path(),
            task_list: default_task_list(),
            api_url: default_api_url(),
            consent_timeout_secs: default_consent_timeout_secs(),
        }
    }
}
