//! Session extractors

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Redirect;

use crate::domain::SessionUser;
use crate::session::session_id_from_headers;
use crate::AppState;

/// Signed-in user of the request. Anyone else is sent to the landing page.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub session_id: String,
    pub user: SessionUser,
}

impl CurrentUser {
    /// Resolve the user without rejecting
    pub async fn from_parts(parts: &Parts, state: &AppState) -> Option<Self> {
        let session_id = session_id_from_headers(&parts.headers)?;
        let user = state.sessions.load(&session_id).await?.user?;
        Some(Self { session_id, user })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Self::from_parts(parts, state).await.ok_or_else(|| Redirect::to("/"))
    }
}

/// Signed-in user if there is one; never rejects
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Self(CurrentUser::from_parts(parts, state).await))
    }
}
