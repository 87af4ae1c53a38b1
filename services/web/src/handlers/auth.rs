use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::error::WebError;
use crate::session::{self, SESSION_COOKIE, clear_session_cookie, set_session_cookie};
use crate::state::AppState;
use crate::templates::{self, HomePage, LoginPage, LogoutPage, RegisterPage};
use crate::usecase::credentials::{RegisterUserInput, RegisterUserUseCase};
use crate::usecase::session::{LoginInput, LoginUseCase, LogoutInput, LogoutUseCase};

// ── GET / ─────────────────────────────────────────────────────────────────────

pub async fn home(State(state): State<AppState>, jar: CookieJar) -> Result<Response, WebError> {
    let session = session::load_session(&state, &jar).await?;
    if session.is_some_and(|session| session.is_authenticated()) {
        return Ok(Redirect::to("/dashboard").into_response());
    }
    Ok(templates::render(HomePage { logged_in: false })?.into_response())
}

// ── GET /register ─────────────────────────────────────────────────────────────

pub async fn register_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, WebError> {
    let logged_in = session::load_session(&state, &jar)
        .await?
        .is_some_and(|session| session.is_authenticated());
    let flash = session::take_flash(&state, &jar).await?;
    templates::render(RegisterPage { flash, logged_in })
}

// ── POST /register ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(body): Form<CredentialsRequest>,
) -> Result<impl IntoResponse, WebError> {
    let usecase = RegisterUserUseCase {
        users: state.user_repo(),
    };
    let outcome = usecase
        .execute(RegisterUserInput {
            email: body.email,
            password: body.password,
        })
        .await;

    let (message, target) = match outcome {
        Ok(_) => ("Successfully registered! You can now log in.", "/login"),
        Err(WebError::Validation(message)) => (message, "/register"),
        Err(WebError::EmailTaken) => (
            "An account with this email already exists.",
            "/register",
        ),
        Err(error) => {
            tracing::error!(error = %error, "register user");
            ("Registration failed. Please try again.", "/register")
        }
    };

    session::flash_and_redirect(&state, jar, message, target).await
}

// ── GET /login ────────────────────────────────────────────────────────────────

pub async fn login_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, WebError> {
    let logged_in = session::load_session(&state, &jar)
        .await?
        .is_some_and(|session| session.is_authenticated());
    let flash = session::take_flash(&state, &jar).await?;
    templates::render(LoginPage { flash, logged_in })
}

// ── POST /login ───────────────────────────────────────────────────────────────

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(body): Form<CredentialsRequest>,
) -> Result<Response, WebError> {
    let presented_token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_owned());

    let usecase = LoginUseCase {
        users: state.user_repo(),
        sessions: state.session_repo(),
    };
    let outcome = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
            api_key: state.api_key.clone(),
            presented_token,
        })
        .await;

    match outcome {
        Ok(session) => {
            let jar = set_session_cookie(jar, session.id);
            Ok((jar, Redirect::to("/dashboard")).into_response())
        }
        // one message for both failure kinds, so the page never reveals
        // whether the email is registered
        Err(WebError::NoSuchAccount | WebError::WrongPassword) => {
            let page = LoginPage {
                flash: Some("Incorrect email or password.".into()),
                logged_in: false,
            };
            Ok(templates::render(page)?.into_response())
        }
        Err(error) => Err(error),
    }
}

// ── GET /logout ───────────────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, WebError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_owned());

    let usecase = LogoutUseCase {
        sessions: state.session_repo(),
    };
    usecase.execute(LogoutInput { token }).await?;

    let jar = clear_session_cookie(jar);
    let page = LogoutPage {
        message: "Logged out successfully.".into(),
        logged_in: false,
    };
    Ok((jar, templates::render(page)?))
}
