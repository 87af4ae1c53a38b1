//! Study mode: a deck's cards in fresh random order.

use rand::RngExt;

use crate::domain::repository::{CardRepository, DeckRepository};
use crate::domain::types::StudySet;
use crate::error::WebError;

/// Uniform in-place shuffle (Fisher–Yates). Every permutation of
/// `items` comes out equally likely.
pub fn shuffle<T>(items: &mut [T], rng: &mut impl RngExt) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

pub struct StudyDeckInput {
    pub user_id: i32,
    pub deck_id: i32,
}

/// Load a deck's cards shuffled for a study run.
pub struct StudyDeckUseCase<D, C> {
    pub decks: D,
    pub cards: C,
}

impl<D: DeckRepository, C: CardRepository> StudyDeckUseCase<D, C> {
    pub async fn execute(&self, input: StudyDeckInput) -> Result<StudySet, WebError> {
        // 1. ownership gate, same as every other deck operation
        let deck = self
            .decks
            .find_owned(input.deck_id, input.user_id)
            .await?
            .ok_or(WebError::NotFound)?;

        // 2. every card of the deck, reshuffled on every visit
        let mut cards = self.cards.list_for_deck(deck.id).await?;
        shuffle(&mut cards, &mut rand::rng());

        Ok(StudySet { deck, cards })
    }
}
