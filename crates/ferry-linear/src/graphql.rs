//! Minimal GraphQL transport: POST `{query, variables}`, unwrap `data` or `errors`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{LinearClient, error::LinearError};

#[derive(Serialize)]
struct Request<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct Response<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    message: String,
}

fn join_messages(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl LinearClient {
    pub(crate) async fn query<V, T>(&self, query: &str, variables: V) -> Result<T, LinearError>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        let resp = self
            .http
            .post(&self.api_url)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .json(&Request { query, variables })
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = resp
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(LinearError::RateLimited { retry_after_secs });
        }

        let body = resp.text().await?;
        let parsed: Response<T> = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(LinearError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }
            Err(e) => return Err(LinearError::GraphQl(format!("unparseable response: {e}"))),
        };

        if !parsed.errors.is_empty() {
            return Err(LinearError::GraphQl(join_messages(&parsed.errors)));
        }
        if !status.is_success() {
            return Err(LinearError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        parsed.data.ok_or(LinearError::MissingData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_joined() {
        let resp: Response<serde_json::Value> = serde_json::from_str(
            r#"{"errors": [{"message": "Authentication required"}, {"message": "not allowed"}]}"#,
        )
        .unwrap();
        assert!(resp.data.is_none());
        assert_eq!(join_messages(&resp.errors), "Authentication required; not allowed");
    }
}
