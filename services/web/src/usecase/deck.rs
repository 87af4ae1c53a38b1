//! Deck listing, creation, deletion, and editor entry.

use crate::domain::repository::{CardRepository, DeckRepository};
use crate::domain::types::{Deck, DeckSummary, Flashcard};
use crate::error::WebError;

pub struct ListDecksInput {
    pub user_id: i32,
}

/// Dashboard listing: the user's decks with their card counts.
pub struct ListDecksUseCase<D> {
    pub decks: D,
}

impl<D: DeckRepository> ListDecksUseCase<D> {
    pub async fn execute(&self, input: ListDecksInput) -> Result<Vec<DeckSummary>, WebError> {
        self.decks.list_with_counts(input.user_id).await
    }
}

pub struct CreateDeckInput {
    pub user_id: i32,
    pub title: String,
}

/// Create a deck together with its first blank card, so the caller
/// lands straight in the editor.
pub struct CreateDeckUseCase<D> {
    pub decks: D,
}

impl<D: DeckRepository> CreateDeckUseCase<D> {
    pub async fn execute(&self, input: CreateDeckInput) -> Result<(Deck, Flashcard), WebError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(WebError::Validation("Deck title must not be empty."));
        }
        self.decks
            .create_with_initial_card(input.user_id, title)
            .await
    }
}

pub struct DeleteDeckInput {
    pub user_id: i32,
    pub deck_id: i32,
}

/// Delete a deck and every card in it.
pub struct DeleteDeckUseCase<D> {
    pub decks: D,
}

impl<D: DeckRepository> DeleteDeckUseCase<D> {
    pub async fn execute(&self, input: DeleteDeckInput) -> Result<(), WebError> {
        if !self.decks.delete_owned(input.deck_id, input.user_id).await? {
            return Err(WebError::NotFound);
        }
        Ok(())
    }
}

/// Where `GET /decks/edit/{deck_id}` should land.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditorTarget {
    pub deck_id: i32,
    pub card_id: i32,
}

pub struct OpenDeckEditorInput {
    pub user_id: i32,
    pub deck_id: i32,
}

/// Resolve the deck's newest card for the editor, creating a blank one
/// when the deck is empty.
pub struct OpenDeckEditorUseCase<D, C> {
    pub decks: D,
    pub cards: C,
}

impl<D: DeckRepository, C: CardRepository> OpenDeckEditorUseCase<D, C> {
    pub async fn execute(&self, input: OpenDeckEditorInput) -> Result<EditorTarget, WebError> {
        // 1. the deck must exist and belong to the caller
        let deck = self
            .decks
            .find_owned(input.deck_id, input.user_id)
            .await?
            .ok_or(WebError::NotFound)?;

        // 2. land on the newest card; an empty deck gets a blank one
        let card = match self.cards.latest_in_deck(deck.id).await? {
            Some(card) => card,
            None => self.cards.add_blank(deck.id).await?,
        };

        Ok(EditorTarget {
            deck_id: deck.id,
            card_id: card.id,
        })
    }
}
