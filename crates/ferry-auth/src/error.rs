use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("client secret file error: {0}")]
    ClientSecret(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("browser consent failed: {0}")]
    BrowserFlowFailed(String),

    #[error("token refresh failed: {0}")]
    RefreshFailed(String),

    #[error("no refresh token cached; delete the token file and authorize again")]
    MissingRefreshToken,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
