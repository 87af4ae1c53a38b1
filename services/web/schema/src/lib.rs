//! sea-orm entities for the web service: accounts, decks, flashcards and
//! server-side sessions.

pub mod decks;
pub mod flashcards;
pub mod sessions;
pub mod users;
