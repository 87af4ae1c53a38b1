use chrono::{DateTime, Utc};

/// Length of the opaque session token stored in the cookie.
pub const SESSION_TOKEN_LEN: usize = 48;

/// Session lifetime in seconds (7 days). Also the cookie Max-Age.
pub const SESSION_TTL_SECS: i64 = 604_800;

/// Registered account. `password_hash` is an argon2 PHC string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Deck of flashcards owned by exactly one user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    pub id: i32,
    pub title: String,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Dashboard row: deck plus how many cards it holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckSummary {
    pub id: i32,
    pub title: String,
    pub card_count: i64,
}

/// One question/answer card. Blank sides are empty strings, never NULL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flashcard {
    pub id: i32,
    pub deck_id: i32,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

/// Ids of the cards adjacent to the one open in the editor, ordered by
/// id within the deck. `None` on a side means no card there.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardNeighbors {
    pub prev_id: Option<i32>,
    pub next_id: Option<i32>,
}

/// Server-side session row keyed by the cookie token.
///
/// `user_id: None` is an anonymous session that only carries a flash
/// message across a redirect; it never passes the auth gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRecord {
    pub id: String,
    pub user_id: Option<i32>,
    pub api_key: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// True iff the session carries a user reference.
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

/// Everything the card editor page needs for one card.
#[derive(Clone, Debug)]
pub struct EditorView {
    pub deck: Deck,
    pub card: Flashcard,
    pub neighbors: CardNeighbors,
}

/// A deck's cards in study order (already shuffled).
#[derive(Clone, Debug)]
pub struct StudySet {
    pub deck: Deck,
    pub cards: Vec<Flashcard>,
}
