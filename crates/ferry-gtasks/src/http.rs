//! Mapping Google API responses onto [`TasksError`].
//!
//! Failed calls carry a JSON body of the form
//! `{"error": {"code": 404, "message": "...", "status": "NOT_FOUND", "errors": [{"reason": "..."}]}}`.
//! Quota errors arrive either as `429` or as `403` with a rate-limit reason.

use serde::Deserialize;

use crate::error::TasksError;

/// Wait used when a quota error comes without `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 30;

const RATE_LIMIT_REASONS: &[&str] = &["rateLimitExceeded", "userRateLimitExceeded"];

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: GoogleError,
}

#[derive(Debug, Default, Deserialize)]
struct GoogleError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    reason: String,
}

impl GoogleError {
    fn is_rate_limit(&self) -> bool {
        self.status == "RESOURCE_EXHAUSTED"
            || self
                .errors
                .iter()
                .any(|detail| RATE_LIMIT_REASONS.contains(&detail.reason.as_str()))
    }

    /// `"NOT_FOUND: Task list not found."`, or whatever part is present.
    fn summary(&self, fallback: &str) -> String {
        match (self.status.is_empty(), self.message.is_empty()) {
            (false, false) => format!("{}: {}", self.status, self.message),
            (true, false) => self.message.clone(),
            (false, true) => self.status.clone(),
            (true, true) => fallback.to_string(),
        }
    }
}

/// Pass successful responses through; turn everything else into an error.
///
/// `401` becomes [`TasksError::Unauthorized`] so the caller can refresh the
/// token and retry.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, TasksError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let retry_after = retry_after_secs(&resp);
    let body = resp.text().await.unwrap_or_default();
    let error = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|envelope| envelope.error)
        .unwrap_or_default();
    let fallback = if body.trim().is_empty() {
        status.to_string()
    } else {
        body.trim().to_string()
    };

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(TasksError::Unauthorized {
            message: error.summary(&fallback),
        });
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS
        || (status == reqwest::StatusCode::FORBIDDEN && error.is_rate_limit())
    {
        return Err(TasksError::RateLimited {
            retry_after_secs: retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        });
    }
    Err(TasksError::Api {
        status: status.as_u16(),
        message: error.summary(&fallback),
    })
}

fn retry_after_secs(resp: &reqwest::Response) -> Option<u64> {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response(status: u16, headers: &[(&str, &str)], body: &str) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        reqwest::Response::from(builder.body(body.to_string()).unwrap())
    }

    fn google_error(code: u16, status: &str, message: &str, reason: &str) -> String {
        serde_json::json!({
            "error": {
                "code": code,
                "message": message,
                "status": status,
                "errors": [{"domain": "global", "reason": reason, "message": message}]
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn success_passes_through() {
        let resp = check_response(response(200, &[], "{}")).await.unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn not_found_uses_google_status_and_message() {
        let body = google_error(404, "NOT_FOUND", "Task list not found.", "notFound");
        let err = check_response(response(404, &[], &body)).await.unwrap_err();
        match err {
            TasksError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "NOT_FOUND: Task list not found.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn unauthorized_is_its_own_variant() {
        let body = google_error(
            401,
            "UNAUTHENTICATED",
            "Request had invalid authentication credentials.",
            "authError",
        );
        let err = check_response(response(401, &[], &body)).await.unwrap_err();
        assert!(
            matches!(err, TasksError::Unauthorized { ref message } if message.starts_with("UNAUTHENTICATED"))
        );
    }

    #[tokio::test]
    async fn too_many_requests_reads_retry_after() {
        let body = google_error(429, "RESOURCE_EXHAUSTED", "Quota exceeded.", "rateLimitExceeded");
        let err = check_response(response(429, &[("Retry-After", "12")], &body))
            .await
            .unwrap_err();
        assert!(matches!(err, TasksError::RateLimited { retry_after_secs: 12 }));
    }

    #[tokio::test]
    async fn forbidden_with_rate_limit_reason_is_rate_limited() {
        let body = google_error(403, "PERMISSION_DENIED", "User Rate Limit Exceeded", "userRateLimitExceeded");
        let err = check_response(response(403, &[], &body)).await.unwrap_err();
        assert!(matches!(
            err,
            TasksError::RateLimited {
                retry_after_secs: DEFAULT_RETRY_AFTER_SECS
            }
        ));
    }

    #[tokio::test]
    async fn forbidden_without_rate_limit_reason_is_an_api_error() {
        let body = google_error(403, "PERMISSION_DENIED", "Insufficient scope.", "insufficientPermissions");
        let err = check_response(response(403, &[], &body)).await.unwrap_err();
        assert!(matches!(err, TasksError::Api { status: 403, .. }));
    }

    #[tokio::test]
    async fn non_json_body_is_kept_as_message() {
        let err = check_response(response(502, &[], "upstream connect error\n"))
            .await
            .unwrap_err();
        match err {
            TasksError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream connect error");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
