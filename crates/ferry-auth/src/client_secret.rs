//! OAuth client secret file, as downloaded from the Google Cloud console.
//!
//! The file wraps the client under either an `installed` (desktop app) or a
//! `web` key; both carry the same fields.

use std::path::Path;

use serde::Deserialize;

use crate::error::AuthError;

const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientSecret>,
    web: Option<ClientSecret>,
}

impl ClientSecret {
    /// Parse the JSON contents of a client secret file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ClientSecret` if the JSON is malformed or has
    /// neither an `installed` nor a `web` section.
    pub fn from_json(json: &str) -> Result<Self, AuthError> {
        let file: ClientSecretFile = serde_json::from_str(json)
            .map_err(|e| AuthError::ClientSecret(format!("invalid JSON: {e}")))?;
        file.installed.or(file.web).ok_or_else(|| {
            AuthError::ClientSecret("expected an 'installed' or 'web' client section".into())
        })
    }

    /// Read and parse a client secret file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ClientSecret` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, AuthError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| AuthError::ClientSecret(format!("read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_installed_client() {
        let json = r#"{
            "installed": {
                "client_id": "123.apps.googleusercontent.com",
                "project_id": "ferry",
                "auth_uri": "https://accounts.google.com/o/oauth2/auth",
                "token_uri": "https://oauth2.googleapis.com/token",
                "client_secret": "shh",
                "redirect_uris": ["http://localhost"]
            }
        }"#;
        let secret = ClientSecret::from_json(json).unwrap();
        assert_eq!(secret.client_id, "123.apps.googleusercontent.com");
        assert_eq!(secret.client_secret, "shh");
        assert_eq!(secret.auth_uri, "https://accounts.google.com/o/oauth2/auth");
        assert_eq!(secret.redirect_uris, vec!["http://localhost".to_string()]);
    }

    #[test]
    fn parses_web_client_with_default_uris() {
        let json = r#"{"web": {"client_id": "abc", "client_secret": "def"}}"#;
        let secret = ClientSecret::from_json(json).unwrap();
        assert_eq!(secret.client_id, "abc");
        assert_eq!(secret.auth_uri, DEFAULT_AUTH_URI);
        assert_eq!(secret.token_uri, DEFAULT_TOKEN_URI);
    }

    #[test]
    fn rejects_file_without_client_section() {
        let err = ClientSecret::from_json(r#"{"type": "service_account"}"#).unwrap_err();
        assert!(err.to_string().contains("'installed' or 'web'"));
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = ClientSecret::from_file(Path::new("/nonexistent/credentials.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/credentials.json"));
    }
}
