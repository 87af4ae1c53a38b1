//! Card editor operations: view, add, save, delete.

use crate::domain::repository::{CardRepository, DeckRepository};
use crate::domain::types::{EditorView, Flashcard};
use crate::error::WebError;

pub struct EditCardInput {
    pub user_id: i32,
    pub deck_id: i32,
    pub card_id: i32,
}

/// Load one card for the editor, with its deck and neighbor ids.
pub struct EditCardUseCase<D, C> {
    pub decks: D,
    pub cards: C,
}

impl<D: DeckRepository, C: CardRepository> EditCardUseCase<D, C> {
    pub async fn execute(&self, input: EditCardInput) -> Result<EditorView, WebError> {
        // 1. the deck must exist and belong to the caller
        let deck = self
            .decks
            .find_owned(input.deck_id, input.user_id)
            .await?
            .ok_or(WebError::NotFound)?;

        // 2. the card must sit in that deck
        let card = self
            .cards
            .find_in_deck(input.card_id, deck.id)
            .await?
            .ok_or(WebError::NotFound)?;

        // 3. prev/next by id for the editor's arrows
        let neighbors = self.cards.neighbors(deck.id, card.id).await?;

        Ok(EditorView {
            deck,
            card,
            neighbors,
        })
    }
}

pub struct AddCardInput {
    pub user_id: i32,
    pub deck_id: i32,
}

/// Append a blank card to the deck.
pub struct AddCardUseCase<D, C> {
    pub decks: D,
    pub cards: C,
}

impl<D: DeckRepository, C: CardRepository> AddCardUseCase<D, C> {
    pub async fn execute(&self, input: AddCardInput) -> Result<Flashcard, WebError> {
        let deck = self
            .decks
            .find_owned(input.deck_id, input.user_id)
            .await?
            .ok_or(WebError::NotFound)?;

        self.cards.add_blank(deck.id).await
    }
}

pub struct SaveCardInput {
    pub user_id: i32,
    pub card_id: i32,
    /// Absent form fields are saved as empty strings.
    pub question: Option<String>,
    pub answer: Option<String>,
}

/// Overwrite both sides of a card.
pub struct SaveCardUseCase<C> {
    pub cards: C,
}

impl<C: CardRepository> SaveCardUseCase<C> {
    pub async fn execute(&self, input: SaveCardInput) -> Result<Flashcard, WebError> {
        // 1. one query resolves existence and ownership together
        let card = self
            .cards
            .find_owned(input.card_id, input.user_id)
            .await?
            .ok_or(WebError::NotFound)?;

        // 2. both sides are written, blank or not
        let question = input.question.unwrap_or_default();
        let answer = input.answer.unwrap_or_default();
        self.cards
            .update_contents(card.id, &question, &answer)
            .await?;

        // 3. the card as saved; its deck drives the redirect back
        Ok(Flashcard {
            question,
            answer,
            ..card
        })
    }
}

pub struct DeleteCardInput {
    pub user_id: i32,
    pub card_id: i32,
}

/// Remove one card from a deck the caller owns. Returns the parent deck
/// id so the browser can land back in that deck's editor.
pub struct DeleteCardUseCase<C> {
    pub cards: C,
}

impl<C: CardRepository> DeleteCardUseCase<C> {
    pub async fn execute(&self, input: DeleteCardInput) -> Result<i32, WebError> {
        let card = self
            .cards
            .find_owned(input.card_id, input.user_id)
            .await?
            .ok_or(WebError::NotFound)?;

        self.cards.delete(card.id).await?;
        Ok(card.deck_id)
    }
}
