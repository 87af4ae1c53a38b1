use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::error::WebError;
use crate::session::{self, CurrentUser};
use crate::state::AppState;
use crate::usecase::deck::{
    CreateDeckInput, CreateDeckUseCase, DeleteDeckInput, DeleteDeckUseCase, OpenDeckEditorInput,
    OpenDeckEditorUseCase,
};

// ── POST /decks/create ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateDeckRequest {
    #[serde(default)]
    pub title: String,
}

pub async fn create_deck(
    State(state): State<AppState>,
    user: CurrentUser,
    jar: CookieJar,
    Form(body): Form<CreateDeckRequest>,
) -> Result<Response, WebError> {
    let usecase = CreateDeckUseCase {
        decks: state.deck_repo(),
    };
    let outcome = usecase
        .execute(CreateDeckInput {
            user_id: user.user.id,
            title: body.title,
        })
        .await;

    match outcome {
        Ok((deck, card)) => {
            let target = format!("/decks/edit/{}/card/{}", deck.id, card.id);
            Ok(Redirect::to(&target).into_response())
        }
        Err(WebError::Validation(message)) => {
            let response = session::flash_and_redirect(&state, jar, message, "/dashboard").await?;
            Ok(response.into_response())
        }
        Err(error) => Err(error),
    }
}

// ── POST /decks/delete/{deck_id} ──────────────────────────────────────────────

pub async fn delete_deck(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(deck_id): Path<i32>,
) -> Result<impl IntoResponse, WebError> {
    let usecase = DeleteDeckUseCase {
        decks: state.deck_repo(),
    };
    usecase
        .execute(DeleteDeckInput {
            user_id: user.user.id,
            deck_id,
        })
        .await?;

    Ok(Redirect::to("/dashboard"))
}

// ── GET /decks/edit/{deck_id} ─────────────────────────────────────────────────

pub async fn open_editor(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(deck_id): Path<i32>,
) -> Result<impl IntoResponse, WebError> {
    let usecase = OpenDeckEditorUseCase {
        decks: state.deck_repo(),
        cards: state.card_repo(),
    };
    let target = usecase
        .execute(OpenDeckEditorInput {
            user_id: user.user.id,
            deck_id,
        })
        .await?;

    let url = format!("/decks/edit/{}/card/{}", target.deck_id, target.card_id);
    Ok(Redirect::to(&url))
}
