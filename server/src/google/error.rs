//! Google call errors

pub type GoogleResult<T> = Result<T, GoogleError>;

#[derive(Debug, thiserror::Error)]
pub enum GoogleError {
    /// Access token rejected (HTTP 401)
    #[error("access token expired or revoked")]
    Unauthorized,
    #[error("Google responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request to Google failed: {0}")]
    Request(#[from] reqwest::Error),
}

const MAX_ERROR_BODY: usize = 240;

/// One-line, bounded copy of an error body for logs and messages
pub(crate) fn summarize_body(body: &str) -> String {
    let mut out = body.trim().replace(['\n', '\r'], " ");
    if out.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !out.is_char_boundary(cut) {
            cut -= 1;
        }
        out.truncate(cut);
        out.push_str("...");
    }
    out
}

/// Map a non-success response to an error; pass successes through.
pub(crate) async fn check_status(resp: reqwest::Response) -> GoogleResult<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(GoogleError::Unauthorized);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(GoogleError::Status {
        status: status.as_u16(),
        body: summarize_body(&body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_body() {
        assert_eq!(summarize_body(" {\n\"error\": 1\n} "), "{ \"error\": 1 }");
        let long = "é".repeat(200);
        let summary = summarize_body(&long);
        assert!(summary.ends_with("..."));
        assert!(summary.len() <= MAX_ERROR_BODY + 3);
    }
}
