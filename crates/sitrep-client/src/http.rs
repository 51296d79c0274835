//! Shared HTTP plumbing for the Confluence and Jira clients.
//!
//! Builds the authenticated `reqwest::Client` and centralizes status-code
//! checks (429 with `Retry-After`, non-success → [`ClientError::Api`]).

use std::time::Duration;

use crate::error::ClientError;

const USER_AGENT: &str = concat!("sitrep/", env!("CARGO_PKG_VERSION"));

/// Longest response body kept in an [`ClientError::Api`] message.
const MAX_ERROR_BODY: usize = 500;

/// Build an HTTP client with the given request timeout.
pub(crate) fn build_client(timeout_secs: u64) -> Result<reqwest::Client, ClientError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`ClientError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success status** → [`ClientError::Api`] with status code and the
///   start of the response body.
pub(crate) async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(ClientError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let mut message = resp.text().await.unwrap_or_default();
        if let Some((cut, _)) = message.char_indices().nth(MAX_ERROR_BODY) {
            message.truncate(cut);
        }
        return Err(ClientError::Api { status, message });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

#[cfg(test)]
pub(crate) fn mock_response(status: u16, body: &str) -> reqwest::Response {
    reqwest::Response::from(
        ::http::Response::builder()
            .status(status)
            .body(body.to_string())
            .unwrap(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response_with_retry_after(status: u16, value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Retry-After", value)
                .body("")
                .unwrap(),
        )
    }

    #[test]
    fn parse_retry_after_from_header() {
        let resp = mock_response_with_retry_after(429, "120");
        assert_eq!(parse_retry_after(&resp), 120);
    }

    #[test]
    fn parse_retry_after_non_numeric() {
        let resp = mock_response_with_retry_after(429, "Wed, 21 Oct 2026 07:28:00 GMT");
        assert_eq!(parse_retry_after(&resp), 60);
    }

    #[tokio::test]
    async fn check_response_rate_limited_default() {
        let err = check_response(mock_response(429, "")).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::RateLimited {
                retry_after_secs: 60
            }
        ));
    }

    #[tokio::test]
    async fn check_response_api_error_keeps_body() {
        let err = check_response(mock_response(401, "Unauthorized"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Api { status: 401, ref message } if message == "Unauthorized"
        ));
    }

    #[tokio::test]
    async fn check_response_truncates_long_bodies() {
        let body = "x".repeat(2_000);
        let err = check_response(mock_response(502, &body)).await.unwrap_err();
        let ClientError::Api { message, .. } = err else {
            panic!("expected Api error");
        };
        assert_eq!(message.len(), MAX_ERROR_BODY);
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(200, "{}")).await.is_ok());
    }

    #[test]
    fn client_builds_with_timeout() {
        assert!(build_client(5).is_ok());
    }
}
