use base64::Engine as _;
use sha2::{Digest, Sha256};

use crate::client_secret::ClientSecret;
use crate::credential::Credential;
use crate::error::AuthError;

/// Scope needed to read and write Google Tasks.
pub const TASKS_SCOPE: &str = "https://www.googleapis.com/auth/tasks";

/// Execute the browser-based OAuth consent flow for an installed app.
///
/// 1. Start `tiny_http` on `127.0.0.1:0` (random port)
/// 2. Open the browser to the consent screen with the loopback redirect
/// 3. Wait for the callback carrying the authorization code (in
///    `spawn_blocking`, since `tiny_http::recv` blocks)
/// 4. Exchange the code (with its PKCE verifier) for a credential
///
/// The caller persists the credential.
///
/// # Errors
///
/// Returns `AuthError::BrowserFlowFailed` if the server cannot bind, the user
/// denies consent, the state nonce does not match, the callback times out, or
/// the code exchange is rejected.
pub async fn login(
    http: &reqwest::Client,
    secret: &ClientSecret,
    scopes: &[&str],
    timeout: std::time::Duration,
) -> Result<Credential, AuthError> {
    let server = tiny_http::Server::http("127.0.0.1:0")
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to bind: {e}")))?;
    let port = server
        .server_addr()
        .to_ip()
        .map(|a| a.port())
        .ok_or_else(|| AuthError::BrowserFlowFailed("no port".into()))?;

    let state = random_urlsafe(16)?;
    let verifier = random_urlsafe(32)?;
    let redirect_uri = format!("http://127.0.0.1:{port}");
    let consent_url = consent_url(secret, &redirect_uri, scopes, &state, &code_challenge(&verifier));

    tracing::info!("opening browser for Google Tasks consent");
    eprintln!("Authorize Ferry in your browser: {consent_url}");
    if let Err(error) = open::that(&consent_url) {
        tracing::warn!(%error, "failed to open browser; open the URL above manually");
    }

    let code = tokio::task::spawn_blocking(move || wait_for_callback(&server, timeout, &state))
        .await
        .map_err(|e| AuthError::BrowserFlowFailed(format!("spawn_blocking join: {e}")))??;

    crate::refresh::exchange_code(http, secret, &code, &redirect_uri, &verifier).await
}

/// Build the consent screen URL.
#[must_use]
pub fn consent_url(
    secret: &ClientSecret,
    redirect_uri: &str,
    scopes: &[&str],
    state: &str,
    code_challenge: &str,
) -> String {
    let scope = scopes.join(" ");
    let params = [
        ("client_id", secret.client_id.as_str()),
        ("redirect_uri", redirect_uri),
        ("response_type", "code"),
        ("scope", scope.as_str()),
        ("state", state),
        ("code_challenge", code_challenge),
        ("code_challenge_method", "S256"),
        ("access_type", "offline"),
        ("prompt", "consent"),
    ];
    let query = params
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{query}", secret.auth_uri)
}

/// PKCE S256 challenge for `verifier`.
#[must_use]
pub fn code_challenge(verifier: &str) -> String {
    let digest = Sha256::digest(verifier.as_bytes());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest)
}

fn random_urlsafe(len: usize) -> Result<String, AuthError> {
    let mut bytes = vec![0u8; len];
    getrandom::fill(&mut bytes)
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to generate nonce: {e}")))?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
}

/// What a request to the loopback server turned out to be.
#[derive(Debug, PartialEq, Eq)]
pub enum Callback {
    /// Not the redirect (favicon, preflight, a bare refresh).
    Ignored,
    Code(String),
    Denied(String),
    StateMismatch,
}

/// Classify a request URL received on the loopback server.
#[must_use]
pub fn parse_callback(url: &str, expected_state: &str) -> Callback {
    let Some((path, query)) = url.split_once('?') else {
        return Callback::Ignored;
    };
    if path != "/" {
        return Callback::Ignored;
    }

    let mut code = None;
    let mut error = None;
    let mut state = None;
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = urlencoding::decode(value).map_or_else(|_| value.to_string(), |v| v.into_owned());
        match key {
            "code" => code = Some(value),
            "error" => error = Some(value),
            "state" => state = Some(value),
            _ => {}
        }
    }

    if code.is_none() && error.is_none() {
        return Callback::Ignored;
    }
    if state.as_deref() != Some(expected_state) {
        return Callback::StateMismatch;
    }
    match (code, error) {
        (_, Some(error)) => Callback::Denied(error),
        (Some(code), None) => Callback::Code(code),
        (None, None) => Callback::Ignored,
    }
}

/// Block until the loopback server receives the redirect.
fn wait_for_callback(
    server: &tiny_http::Server,
    timeout: std::time::Duration,
    expected_state: &str,
) -> Result<String, AuthError> {
    let deadline = std::time::Instant::now() + timeout;
    let timed_out = || {
        AuthError::BrowserFlowFailed(format!(
            "browser callback timed out after {}s",
            timeout.as_secs()
        ))
    };

    loop {
        let remaining = deadline.saturating_duration_since(std::time::Instant::now());
        if remaining.is_zero() {
            return Err(timed_out());
        }

        let request = match server.recv_timeout(remaining) {
            Ok(Some(req)) => req,
            Ok(None) => return Err(timed_out()),
            Err(e) => return Err(AuthError::BrowserFlowFailed(format!("recv error: {e}"))),
        };

        match parse_callback(request.url(), expected_state) {
            Callback::Ignored => {
                let _ = request.respond(tiny_http::Response::from_string("").with_status_code(204));
            }
            Callback::Code(code) => {
                let _ = request.respond(html(
                    "<html><body><h1>Ferry is authorized</h1><p>You can close this tab.</p></body></html>",
                ));
                return Ok(code);
            }
            Callback::Denied(reason) => {
                let _ = request.respond(html(
                    "<html><body><h1>Authorization denied</h1><p>Check the terminal.</p></body></html>",
                ));
                return Err(AuthError::BrowserFlowFailed(format!("consent denied: {reason}")));
            }
            Callback::StateMismatch => {
                let _ = request.respond(html(
                    "<html><body><h1>Authorization failed</h1><p>State mismatch. Check the terminal.</p></body></html>",
                ));
                return Err(AuthError::BrowserFlowFailed("state mismatch, possible CSRF".into()));
            }
        }
    }
}

fn html(body: &str) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let response = tiny_http::Response::from_string(body);
    match tiny_http::Header::from_bytes("Content-Type", "text/html; charset=utf-8") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
