#![allow(async_fn_in_trait)]

use crate::domain::types::{
    CardNeighbors, Deck, DeckSummary, Flashcard, SessionRecord, User,
};
use crate::error::WebError;

/// Repository for accounts.
pub trait UserRepository: Send + Sync {
    /// Insert a new account. A duplicate email maps to `EmailTaken`.
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, WebError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, WebError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, WebError>;
}

/// Repository for decks. Every method taking a `user_id` resolves
/// existence and ownership in one filtered query, so a missing deck and
/// another user's deck are indistinguishable to callers.
pub trait DeckRepository: Send + Sync {
    /// Decks of one user with their card counts, newest (highest id) first.
    async fn list_with_counts(&self, user_id: i32) -> Result<Vec<DeckSummary>, WebError>;

    /// Insert the deck and its first blank card in one transaction.
    async fn create_with_initial_card(
        &self,
        user_id: i32,
        title: &str,
    ) -> Result<(Deck, Flashcard), WebError>;

    async fn find_owned(&self, deck_id: i32, user_id: i32) -> Result<Option<Deck>, WebError>;

    /// Delete the deck and all of its cards in one transaction. Returns
    /// `false` — and deletes nothing — when the deck is missing or owned
    /// by someone else.
    async fn delete_owned(&self, deck_id: i32, user_id: i32) -> Result<bool, WebError>;
}

/// Repository for flashcards.
pub trait CardRepository: Send + Sync {
    /// Insert a blank card. Deck ownership is checked by the caller first.
    async fn add_blank(&self, deck_id: i32) -> Result<Flashcard, WebError>;

    async fn find_in_deck(
        &self,
        card_id: i32,
        deck_id: i32,
    ) -> Result<Option<Flashcard>, WebError>;

    /// Card joined through its deck's owner, in one query.
    async fn find_owned(&self, card_id: i32, user_id: i32) -> Result<Option<Flashcard>, WebError>;

    /// Card with the highest id in the deck.
    async fn latest_in_deck(&self, deck_id: i32) -> Result<Option<Flashcard>, WebError>;

    /// Adjacent card ids within the deck, by id order.
    async fn neighbors(&self, deck_id: i32, card_id: i32) -> Result<CardNeighbors, WebError>;

    /// Overwrite both sides unconditionally.
    async fn update_contents(
        &self,
        card_id: i32,
        question: &str,
        answer: &str,
    ) -> Result<(), WebError>;

    async fn delete(&self, card_id: i32) -> Result<(), WebError>;

    /// All cards of a deck, id ascending.
    async fn list_for_deck(&self, deck_id: i32) -> Result<Vec<Flashcard>, WebError>;
}

/// Repository for server-side sessions.
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &SessionRecord) -> Result<(), WebError>;

    /// Unexpired session by token.
    async fn find_valid(&self, token: &str) -> Result<Option<SessionRecord>, WebError>;

    /// Read and clear the one-shot flash message.
    async fn take_message(&self, token: &str) -> Result<Option<String>, WebError>;

    async fn set_message(&self, token: &str, message: &str) -> Result<(), WebError>;

    /// Remove the session. Missing rows are fine — logout is idempotent.
    async fn delete(&self, token: &str) -> Result<(), WebError>;

    /// Sweep rows past their expiry. Returns how many were removed.
    async fn delete_expired(&self) -> Result<u64, WebError>;
}
