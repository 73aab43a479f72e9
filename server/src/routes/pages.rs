//! Server-rendered pages

use axum::extract::Query;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use super::auth::{AUTH_FAILED, MISSING_PERMISSION};
use super::extract::{CurrentUser, MaybeUser};

/// Bundle produced by `wasm-bindgen --target web` for the board
const APP_SCRIPT: &str = "/public/pkg/task_matrix_ui.js";

#[derive(Debug, Default, Deserialize)]
pub struct LandingParams {
    pub error: Option<String>,
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn error_message(code: &str) -> Option<&'static str> {
    match code {
        AUTH_FAILED => Some("Authentication failed. Please try again."),
        MISSING_PERMISSION => {
            Some("Task Matrix needs access to Google Tasks. Please sign in again and allow Tasks access.")
        }
        _ => None,
    }
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/public/styles.css">
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        body = body,
    ))
}

/// `GET /`
pub async fn landing(MaybeUser(user): MaybeUser, Query(params): Query<LandingParams>) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    let error = params
        .error
        .as_deref()
        .and_then(error_message)
        .map(|msg| format!(r#"<div class="alert alert-error">{}</div>"#, msg))
        .unwrap_or_default();
    let body = format!(
        r#"<main class="landing">
<h1>Task Matrix</h1>
<p>Sort your Google Tasks by urgency and importance.</p>
{error}
<a class="btn btn-primary" href="/auth/google">Sign in with Google</a>
<footer><a href="/privacy">Privacy Policy</a> · <a href="/terms">Terms of Service</a></footer>
</main>"#
    );
    layout("Task Matrix", &body).into_response()
}

/// `GET /dashboard`
pub async fn dashboard(user: CurrentUser) -> Html<String> {
    let body = format!(
        r#"<div class="signed-in" data-user-id="{id}">Signed in as {name}</div>
<script type="module">
import init from "{script}";
init();
</script>"#,
        id = escape_html(&user.user.id),
        name = escape_html(&user.user.display_name),
        script = APP_SCRIPT,
    );
    layout("Task Matrix", &body)
}

/// `GET /privacy`
pub async fn privacy() -> Html<String> {
    layout(
        "Privacy Policy",
        r#"<main class="legal">
<h1>Privacy Policy</h1>
<p>Task Matrix reads and updates your Google Tasks only to show them on your board.
Tasks are never stored on our server. Quadrant placement is kept in your browser's local storage.</p>
<p>Your sign-in session lasts up to 30 days and is removed when you sign out.</p>
<p><a href="/">Back</a></p>
</main>"#,
    )
}

/// `GET /terms`
pub async fn terms() -> Html<String> {
    layout(
        "Terms of Service",
        r#"<main class="legal">
<h1>Terms of Service</h1>
<p>Task Matrix is provided as is, without warranty. You remain responsible for the content of your tasks.</p>
<p><a href="/">Back</a></p>
</main>"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<b>"Tom" & 'Jerry'</b>"#), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message("auth_failed"), Some("Authentication failed. Please try again."));
        assert!(error_message("missing_permission").is_some());
        assert_eq!(error_message("access_denied"), None);
    }
}
