//! Session Layer
//!
//! Server-side sessions keyed by an opaque id carried in the
//! `taskmatrix.sid` cookie.

mod cookie;
mod store;

pub use cookie::{clear_cookie, session_cookie, session_id_from_headers, SESSION_COOKIE};
pub use store::{MemorySessionStore, Session, SessionStore, SESSION_TTL_DAYS, SIGN_IN_TTL_MINUTES};

/// Fresh random session id
pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
