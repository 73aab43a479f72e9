//! Google sign-in and sign-out

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::Utc;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;

use super::error::{AppError, AppResult};
use crate::domain::SessionUser;
use crate::google::{GoogleError, OAuthProvider, TASKS_SCOPE};
use crate::session::{clear_cookie, new_session_id, session_cookie, session_id_from_headers, Session};
use crate::AppState;

/// Characters left alone in a query value, as `encodeURIComponent` does
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const AUTH_FAILED: &str = "auth_failed";
pub const MISSING_PERMISSION: &str = "missing_permission";

#[derive(Debug, thiserror::Error)]
enum SignInError {
    #[error("no sign-in in progress or state mismatch")]
    StateMismatch,
    #[error("callback carried no authorization code")]
    MissingCode,
    #[error("Tasks permission is required for this app to work")]
    MissingTasksScope,
    #[error(transparent)]
    Google(#[from] GoogleError),
}

impl SignInError {
    fn code(&self) -> &'static str {
        match self {
            SignInError::MissingTasksScope => MISSING_PERMISSION,
            _ => AUTH_FAILED,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub scope: Option<String>,
}

fn landing_with_error(code: &str) -> Redirect {
    Redirect::to(&format!("/?error={}", utf8_percent_encode(code, QUERY_VALUE)))
}

/// `GET /auth/google`: remember a CSRF state and send the user to Google.
pub async fn start_sign_in(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    let oauth = state.oauth.as_ref().ok_or(AppError::OAuthNotConfigured)?;

    let csrf = new_session_id();
    let url = oauth.authorize_url(&csrf);

    let existing = match session_id_from_headers(&headers) {
        Some(id) => state.sessions.load(&id).await.map(|session| (id, session)),
        None => None,
    };
    let (session_id, session) = match existing {
        Some((id, mut session)) => {
            session.oauth_state = Some(csrf);
            (id, session)
        }
        // Anonymous visitors get a short-lived session until Google answers
        None => (new_session_id(), Session::sign_in_attempt(Utc::now(), csrf)),
    };
    state.sessions.save(&session_id, session).await;

    let cookie = session_cookie(&session_id, state.config.production);
    Ok(([(SET_COOKIE, cookie)], Redirect::to(&url)).into_response())
}

/// `GET /auth/google/callback`
pub async fn finish_sign_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Response {
    if let Some(error) = params.error.as_deref() {
        tracing::error!("Google returned error: {}", error);
        return landing_with_error(error).into_response();
    }
    let Some(oauth) = state.oauth.as_ref() else {
        tracing::warn!("OAuth callback while OAuth is not configured");
        return Redirect::to("/").into_response();
    };

    let session_id = session_id_from_headers(&headers);
    let session = match session_id.as_deref() {
        Some(id) => state.sessions.load(id).await,
        None => None,
    };

    match complete_sign_in(oauth.as_ref(), session.as_ref(), &params).await {
        Ok(user) => {
            tracing::info!("user authenticated: {}", user.display_name);
            // A fresh id on sign-in so a pre-login id cannot be reused
            if let Some(old) = session_id {
                state.sessions.remove(&old).await;
            }
            let new_id = new_session_id();
            let mut session = Session::new(Utc::now());
            session.user = Some(user);
            state.sessions.save(&new_id, session).await;

            let cookie = session_cookie(&new_id, state.config.production);
            ([(SET_COOKIE, cookie)], Redirect::to("/dashboard")).into_response()
        }
        Err(e) => {
            tracing::warn!("sign-in failed: {}", e);
            landing_with_error(e.code()).into_response()
        }
    }
}

async fn complete_sign_in(
    oauth: &dyn OAuthProvider,
    session: Option<&Session>,
    params: &CallbackParams,
) -> Result<SessionUser, SignInError> {
    let expected = session.and_then(|s| s.oauth_state.as_deref());
    if expected.is_none() || expected != params.state.as_deref() {
        return Err(SignInError::StateMismatch);
    }
    let code = params.code.as_deref().ok_or(SignInError::MissingCode)?;

    let grant = oauth.exchange_code(code).await?;
    let scope_in_query = params
        .scope
        .as_deref()
        .is_some_and(|granted| granted.split_whitespace().any(|s| s == TASKS_SCOPE));
    if !grant.has_scope(TASKS_SCOPE) && !scope_in_query {
        return Err(SignInError::MissingTasksScope);
    }

    let profile = oauth.fetch_profile(&grant.access_token).await?;
    let display_name = profile
        .name
        .clone()
        .or_else(|| profile.email.clone())
        .unwrap_or_else(|| profile.id.clone());
    Ok(SessionUser {
        id: profile.id,
        display_name,
        email: profile.email,
        tokens: grant.into_tokens(None, Utc::now()),
    })
}

/// `POST /auth/logout`
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(id) = session_id_from_headers(&headers) {
        state.sessions.remove(&id).await;
    }
    ([(SET_COOKIE, clear_cookie(state.config.production))], Redirect::to("/")).into_response()
}
