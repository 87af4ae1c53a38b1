//! Session machinery: the cookie, the opaque token, and the auth gate.
//!
//! Sessions live server-side (one row per token); the cookie carries only
//! the token. An anonymous row (no user) may exist solely to float a flash
//! message across a redirect for a logged-out visitor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use rand::RngExt;

use crate::domain::repository::{SessionRepository as _, UserRepository as _};
use crate::domain::types::{SESSION_TOKEN_LEN, SESSION_TTL_SECS, SessionRecord, User};
use crate::error::WebError;
use crate::state::AppState;

/// Cookie name for the session token.
pub const SESSION_COOKIE: &str = "kartei_session";

/// Charset for session tokens (uppercase alphanumeric).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a fresh opaque session token.
pub fn generate_session_token() -> String {
    let mut rng = rand::rng();
    (0..SESSION_TOKEN_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Fresh anonymous session record (flash-message carrier, never passes
/// the auth gate).
pub fn anonymous_session() -> SessionRecord {
    session_record(None, None)
}

/// Fresh authenticated session record, created at login.
pub fn authenticated_session(user_id: i32, api_key: String) -> SessionRecord {
    session_record(Some(user_id), Some(api_key))
}

fn session_record(user_id: Option<i32>, api_key: Option<String>) -> SessionRecord {
    let now = Utc::now();
    SessionRecord {
        id: generate_session_token(),
        user_id,
        api_key,
        message: None,
        created_at: now,
        expires_at: now + Duration::seconds(SESSION_TTL_SECS),
    }
}

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use kartei_web::session::{SESSION_COOKIE, set_session_cookie};
///
/// let jar = CookieJar::new();
/// let jar = set_session_cookie(jar, "token_value".to_string());
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604800)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(jar: CookieJar, token: String) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .max_age(time::Duration::seconds(SESSION_TTL_SECS))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the session cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use kartei_web::session::{SESSION_COOKIE, clear_session_cookie, set_session_cookie};
///
/// let jar = CookieJar::new();
/// let jar = set_session_cookie(jar, "t".to_string());
/// let jar = clear_session_cookie(jar);
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookie(jar: CookieJar) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// The logged-in user, resolved from the session cookie.
///
/// Rejection is `WebError::AuthRequired`, which redirects to `/login`:
/// a missing cookie, an unknown or expired token, an anonymous session
/// and a vanished user all look the same to the browser.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub session_token: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = WebError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = CookieJar::from_headers(&parts.headers)
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_owned());
        let state = state.clone();

        async move {
            let token = token.ok_or(WebError::AuthRequired)?;
            let session = state
                .session_repo()
                .find_valid(&token)
                .await?
                .ok_or(WebError::AuthRequired)?;
            let user_id = session.user_id.ok_or(WebError::AuthRequired)?;
            let user = state
                .user_repo()
                .find_by_id(user_id)
                .await?
                .ok_or(WebError::AuthRequired)?;
            Ok(CurrentUser {
                user,
                session_token: token,
            })
        }
    }
}

/// Resolve the cookie to its session row, if any. Anonymous sessions
/// count — this is for public pages that only need the flash message or
/// an "already logged in?" check.
pub async fn load_session(
    state: &AppState,
    jar: &CookieJar,
) -> Result<Option<SessionRecord>, WebError> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };
    state.session_repo().find_valid(cookie.value()).await
}

/// Like `load_session`, but creates an anonymous session (and cookie)
/// when none exists yet.
pub async fn ensure_session(
    state: &AppState,
    jar: CookieJar,
) -> Result<(SessionRecord, CookieJar), WebError> {
    if let Some(session) = load_session(state, &jar).await? {
        return Ok((session, jar));
    }
    let session = anonymous_session();
    state.session_repo().create(&session).await?;
    let jar = set_session_cookie(jar, session.id.clone());
    Ok((session, jar))
}

/// Store a one-shot flash message and redirect. The message shows up on
/// the next rendered page and is gone after that.
pub async fn flash_and_redirect(
    state: &AppState,
    jar: CookieJar,
    message: &str,
    to: &str,
) -> Result<(CookieJar, Redirect), WebError> {
    let (session, jar) = ensure_session(state, jar).await?;
    state.session_repo().set_message(&session.id, message).await?;
    Ok((jar, Redirect::to(to)))
}

/// Read and clear the flash message for the presented cookie, if any.
pub async fn take_flash(state: &AppState, jar: &CookieJar) -> Result<Option<String>, WebError> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };
    state.session_repo().take_message(cookie.value()).await
}
