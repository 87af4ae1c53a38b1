use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::error::WebError;
use crate::session::{self, CurrentUser};
use crate::state::AppState;
use crate::templates::{self, StudyPage};
use crate::usecase::study::{StudyDeckInput, StudyDeckUseCase};

// ── GET /decks/study/{deck_id} ────────────────────────────────────────────────

pub async fn study_deck(
    State(state): State<AppState>,
    user: CurrentUser,
    jar: CookieJar,
    Path(deck_id): Path<i32>,
) -> Result<Response, WebError> {
    let usecase = StudyDeckUseCase {
        decks: state.deck_repo(),
        cards: state.card_repo(),
    };
    let set = usecase
        .execute(StudyDeckInput {
            user_id: user.user.id,
            deck_id,
        })
        .await?;

    if set.cards.is_empty() {
        let response = session::flash_and_redirect(
            &state,
            jar,
            "This deck has no cards yet. Add a card before studying.",
            "/dashboard",
        )
        .await?;
        return Ok(response.into_response());
    }

    let page = StudyPage {
        deck_id: set.deck.id,
        deck_title: set.deck.title,
        cards: set.cards,
        logged_in: true,
    };
    Ok(templates::render(page)?.into_response())
}
