use axum::{extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;

use crate::error::WebError;
use crate::session::{self, CurrentUser};
use crate::state::AppState;
use crate::templates::{self, DashboardPage};
use crate::usecase::deck::{ListDecksInput, ListDecksUseCase};

// ── GET /dashboard ────────────────────────────────────────────────────────────

pub async fn dashboard(
    State(state): State<AppState>,
    user: CurrentUser,
    jar: CookieJar,
) -> Result<impl IntoResponse, WebError> {
    let flash = session::take_flash(&state, &jar).await?;

    let usecase = ListDecksUseCase {
        decks: state.deck_repo(),
    };
    let page = match usecase
        .execute(ListDecksInput {
            user_id: user.user.id,
        })
        .await
    {
        Ok(decks) => DashboardPage {
            decks,
            flash,
            error: None,
            logged_in: true,
        },
        // the dashboard still renders when the listing fails
        Err(error) => {
            tracing::error!(error = %error, "list decks");
            DashboardPage {
                decks: vec![],
                flash,
                error: Some("Error loading decks. Please try again.".into()),
                logged_in: true,
            }
        }
    };

    templates::render(page)
}
