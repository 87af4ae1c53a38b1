use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use kartei_core::health::healthz;
use kartei_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{home, login, login_page, logout, register, register_page},
    card::{add_card, delete_card, edit_card, save_card},
    dashboard::dashboard,
    deck::{create_deck, delete_deck, open_editor},
    study::study_deck,
};
use crate::state::AppState;

/// Handler for `GET /readyz`: 503 until migrations have run and the
/// listener is up.
async fn readyz(State(state): State<AppState>) -> StatusCode {
    state.readiness.status()
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Home and accounts
        .route("/", get(home))
        .route("/register", get(register_page))
        .route("/register", post(register))
        .route("/login", get(login_page))
        .route("/login", post(login))
        .route("/logout", get(logout))
        // Dashboard
        .route("/dashboard", get(dashboard))
        // Decks
        .route("/decks/create", post(create_deck))
        .route("/decks/delete/{deck_id}", post(delete_deck))
        .route("/decks/edit/{deck_id}", get(open_editor))
        // Cards
        .route("/decks/edit/{deck_id}/card/{card_id}", get(edit_card))
        .route("/decks/{deck_id}/cards/add", post(add_card))
        .route("/cards/save/{card_id}", post(save_card))
        .route("/cards/delete/{card_id}", post(delete_card))
        // Study
        .route("/decks/study/{deck_id}", get(study_deck))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
