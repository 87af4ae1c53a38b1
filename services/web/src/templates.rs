//! Askama templates backing every rendered page.
//!
//! All user-supplied text (deck titles, card sides, emails) passes
//! through askama's HTML escaping. Study mode renders card text into
//! hidden DOM nodes rather than a JSON script blob, so nothing
//! user-written ever lands in a script context.

use anyhow::Context as _;
use askama::Template;
use axum::response::Html;

use crate::domain::types::{DeckSummary, Flashcard};
use crate::error::WebError;

/// Render a page, mapping template failure into the 500 path.
pub fn render<T: Template>(page: T) -> Result<Html<String>, WebError> {
    let html = page.render().context("render template")?;
    Ok(Html(html))
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub logged_in: bool,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub flash: Option<String>,
    pub logged_in: bool,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub flash: Option<String>,
    pub logged_in: bool,
}

#[derive(Template)]
#[template(path = "logout.html")]
pub struct LogoutPage {
    pub message: String,
    pub logged_in: bool,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub decks: Vec<DeckSummary>,
    pub flash: Option<String>,
    pub error: Option<String>,
    pub logged_in: bool,
}

/// Deck the editor is working in. `None` on the save-failure re-render,
/// where the form only carries the card id; the deck-scoped links render
/// disabled rather than pointing at a deck we cannot name.
pub struct EditorDeck {
    pub id: i32,
    pub title: String,
}

#[derive(Template)]
#[template(path = "editor.html")]
pub struct EditorPage {
    pub deck: Option<EditorDeck>,
    pub card_id: i32,
    pub question: String,
    pub answer: String,
    pub prev_id: Option<i32>,
    pub next_id: Option<i32>,
    pub error: Option<String>,
    pub logged_in: bool,
}

#[derive(Template)]
#[template(path = "study.html")]
pub struct StudyPage {
    pub deck_id: i32,
    pub deck_title: String,
    pub cards: Vec<Flashcard>,
    pub logged_in: bool,
}

/// Standalone page for error responses; deliberately free of layout
/// machinery so it renders even when everything else is broken.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub status: u16,
    pub message: String,
}
