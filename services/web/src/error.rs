use askama::Template as _;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::templates::ErrorPage;

/// Web service error variants.
///
/// Every route is a browser page, so errors render as HTML rather than a
/// structured body. `AuthRequired` is the one exception: the session gate
/// turns it into a redirect to the login form. A missing record and a
/// record owned by someone else both surface as `NotFound`.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("authentication required")]
    AuthRequired,
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Validation(&'static str),
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error("no account registered for this email")]
    NoSuchAccount,
    #[error("incorrect password")]
    WrongPassword,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl WebError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AuthRequired => "AUTH_REQUIRED",
            Self::NotFound => "NOT_FOUND",
            Self::Validation(_) => "INVALID_INPUT",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::NoSuchAccount => "NO_SUCH_ACCOUNT",
            Self::WrongPassword => "WRONG_PASSWORD",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::AuthRequired => return Redirect::to("/login").into_response(),
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::NoSuchAccount | Self::WrongPassword => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let page = ErrorPage {
            status: status.as_u16(),
            message: self.to_string(),
        };
        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            // rendering a static template cannot realistically fail; keep
            // the status either way
            Err(_) => (status, self.to_string()).into_response(),
        }
    }
}
