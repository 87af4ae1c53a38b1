use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::error::WebError;
use crate::session::CurrentUser;
use crate::state::AppState;
use crate::templates::{self, EditorDeck, EditorPage};
use crate::usecase::card::{
    AddCardInput, AddCardUseCase, DeleteCardInput, DeleteCardUseCase, EditCardInput,
    EditCardUseCase, SaveCardInput, SaveCardUseCase,
};

// ── GET /decks/edit/{deck_id}/card/{card_id} ──────────────────────────────────

pub async fn edit_card(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((deck_id, card_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, WebError> {
    let usecase = EditCardUseCase {
        decks: state.deck_repo(),
        cards: state.card_repo(),
    };
    let view = usecase
        .execute(EditCardInput {
            user_id: user.user.id,
            deck_id,
            card_id,
        })
        .await?;

    templates::render(EditorPage {
        deck: Some(EditorDeck {
            id: view.deck.id,
            title: view.deck.title,
        }),
        card_id: view.card.id,
        question: view.card.question,
        answer: view.card.answer,
        prev_id: view.neighbors.prev_id,
        next_id: view.neighbors.next_id,
        error: None,
        logged_in: true,
    })
}

// ── POST /decks/{deck_id}/cards/add ───────────────────────────────────────────

pub async fn add_card(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(deck_id): Path<i32>,
) -> Result<Response, WebError> {
    let usecase = AddCardUseCase {
        decks: state.deck_repo(),
        cards: state.card_repo(),
    };
    let outcome = usecase
        .execute(AddCardInput {
            user_id: user.user.id,
            deck_id,
        })
        .await;

    match outcome {
        Ok(card) => {
            let target = format!("/decks/edit/{}/card/{}", deck_id, card.id);
            Ok(Redirect::to(&target).into_response())
        }
        Err(WebError::NotFound) => Err(WebError::NotFound),
        // a failed insert lands back at the deck's editor entry point
        Err(error) => {
            tracing::error!(error = %error, "add card");
            Ok(Redirect::to(&format!("/decks/edit/{deck_id}")).into_response())
        }
    }
}

// ── POST /cards/save/{card_id} ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SaveCardRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
}

pub async fn save_card(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(card_id): Path<i32>,
    Form(body): Form<SaveCardRequest>,
) -> Result<Response, WebError> {
    let usecase = SaveCardUseCase {
        cards: state.card_repo(),
    };
    let outcome = usecase
        .execute(SaveCardInput {
            user_id: user.user.id,
            card_id,
            question: body.question.clone(),
            answer: body.answer.clone(),
        })
        .await;

    match outcome {
        Ok(card) => {
            let target = format!("/decks/edit/{}/card/{}", card.deck_id, card.id);
            Ok(Redirect::to(&target).into_response())
        }
        Err(WebError::NotFound) => Err(WebError::NotFound),
        // re-render with the submitted text so nothing typed is lost; the
        // save form only carries the card id, so the deck-scoped links
        // render disabled instead of pointing at a deck we cannot name
        Err(error) => {
            tracing::error!(error = %error, "save card");
            let page = EditorPage {
                deck: None,
                card_id,
                question: body.question.unwrap_or_default(),
                answer: body.answer.unwrap_or_default(),
                prev_id: None,
                next_id: None,
                error: Some("Error saving card. Please try again.".into()),
                logged_in: true,
            };
            Ok(templates::render(page)?.into_response())
        }
    }
}

// ── POST /cards/delete/{card_id} ──────────────────────────────────────────────

pub async fn delete_card(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(card_id): Path<i32>,
) -> Result<impl IntoResponse, WebError> {
    let usecase = DeleteCardUseCase {
        cards: state.card_repo(),
    };
    let deck_id = usecase
        .execute(DeleteCardInput {
            user_id: user.user.id,
            card_id,
        })
        .await?;

    Ok(Redirect::to(&format!("/decks/edit/{deck_id}")))
}
