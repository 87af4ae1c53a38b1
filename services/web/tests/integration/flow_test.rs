//! Whole-flow coverage over the in-memory repositories: every step a user
//! takes in the browser, minus HTTP.

use chrono::{Duration, Utc};

use kartei_web::domain::repository::SessionRepository as _;
use kartei_web::error::WebError;
use kartei_web::session::authenticated_session;
use kartei_web::usecase::card::{
    AddCardInput, AddCardUseCase, DeleteCardInput, DeleteCardUseCase, EditCardInput,
    EditCardUseCase, SaveCardInput, SaveCardUseCase,
};
use kartei_web::usecase::credentials::{RegisterUserInput, RegisterUserUseCase};
use kartei_web::usecase::deck::{
    CreateDeckInput, CreateDeckUseCase, DeleteDeckInput, DeleteDeckUseCase, ListDecksInput,
    ListDecksUseCase, OpenDeckEditorInput, OpenDeckEditorUseCase,
};
use kartei_web::usecase::session::{LoginInput, LoginUseCase, LogoutInput, LogoutUseCase};
use kartei_web::usecase::study::{StudyDeckInput, StudyDeckUseCase};

use crate::helpers::{
    shared_deck_store, MockCards, MockDecks, MockSessions, MockUsers, TEST_EMAIL, TEST_PASSWORD,
};

#[tokio::test]
async fn should_register_login_and_logout() {
    let users = MockUsers::empty();
    let sessions = MockSessions::empty();

    let register = RegisterUserUseCase {
        users: users.clone(),
    };
    let user = register
        .execute(RegisterUserInput {
            email: TEST_EMAIL.to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .expect("registration should succeed");

    let login = LoginUseCase {
        users: users.clone(),
        sessions: sessions.clone(),
    };
    let session = login
        .execute(LoginInput {
            email: TEST_EMAIL.to_owned(),
            password: TEST_PASSWORD.to_owned(),
            api_key: "test-key".to_owned(),
            presented_token: None,
        })
        .await
        .expect("login should succeed");
    assert_eq!(session.user_id, Some(user.id));

    let found = sessions
        .find_valid(&session.id)
        .await
        .expect("lookup should succeed");
    assert!(found.is_some(), "the issued session should be resolvable");

    let logout = LogoutUseCase {
        sessions: sessions.clone(),
    };
    logout
        .execute(LogoutInput {
            token: Some(session.id.clone()),
        })
        .await
        .expect("logout should succeed");

    let gone = sessions
        .find_valid(&session.id)
        .await
        .expect("lookup should succeed");
    assert!(gone.is_none(), "a logged-out session must not authenticate");
}

#[tokio::test]
async fn should_reject_a_second_registration_for_the_same_email() {
    let users = MockUsers::empty();
    let register = RegisterUserUseCase {
        users: users.clone(),
    };

    register
        .execute(RegisterUserInput {
            email: TEST_EMAIL.to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .expect("first registration should succeed");

    let second = register
        .execute(RegisterUserInput {
            email: TEST_EMAIL.to_owned(),
            password: "a different password".to_owned(),
        })
        .await;
    assert!(
        matches!(second, Err(WebError::EmailTaken)),
        "expected EmailTaken, got {second:?}"
    );
}

#[tokio::test]
async fn should_build_a_deck_card_by_card() {
    let store = shared_deck_store();
    let decks = MockDecks::over(&store);
    let cards = MockCards::over(&store);

    let create = CreateDeckUseCase {
        decks: decks.clone(),
    };
    let (deck, first) = create
        .execute(CreateDeckInput {
            user_id: 1,
            title: "Capitals".to_owned(),
        })
        .await
        .expect("deck creation should succeed");
    assert_eq!(first.question, "", "a new deck starts with a blank card");

    let save = SaveCardUseCase {
        cards: cards.clone(),
    };
    save.execute(SaveCardInput {
        user_id: 1,
        card_id: first.id,
        question: Some("Capital of France?".to_owned()),
        answer: Some("Paris".to_owned()),
    })
    .await
    .expect("saving the first card should succeed");

    let add = AddCardUseCase {
        decks: decks.clone(),
        cards: cards.clone(),
    };
    let second = add
        .execute(AddCardInput {
            user_id: 1,
            deck_id: deck.id,
        })
        .await
        .expect("adding a card should succeed");
    let third = add
        .execute(AddCardInput {
            user_id: 1,
            deck_id: deck.id,
        })
        .await
        .expect("adding a card should succeed");

    let edit = EditCardUseCase { decks, cards };
    let view = edit
        .execute(EditCardInput {
            user_id: 1,
            deck_id: deck.id,
            card_id: second.id,
        })
        .await
        .expect("the editor should open on the middle card");

    assert_eq!(view.deck.title, "Capitals");
    assert_eq!(view.card.id, second.id);
    assert_eq!(view.neighbors.prev_id, Some(first.id));
    assert_eq!(view.neighbors.next_id, Some(third.id));

    let oldest = edit
        .execute(EditCardInput {
            user_id: 1,
            deck_id: deck.id,
            card_id: first.id,
        })
        .await
        .expect("the editor should open on the first card");
    assert_eq!(oldest.neighbors.prev_id, None, "the first card has no previous");
    assert_eq!(oldest.neighbors.next_id, Some(second.id));

    let newest = edit
        .execute(EditCardInput {
            user_id: 1,
            deck_id: deck.id,
            card_id: third.id,
        })
        .await
        .expect("the editor should open on the last card");
    assert_eq!(newest.neighbors.prev_id, Some(second.id));
    assert_eq!(newest.neighbors.next_id, None, "the last card has no next");
}

#[tokio::test]
async fn should_show_every_card_exactly_once_in_study() {
    let store = shared_deck_store();
    let decks = MockDecks::over(&store);
    let cards = MockCards::over(&store);

    let (deck, first) = CreateDeckUseCase {
        decks: decks.clone(),
    }
    .execute(CreateDeckInput {
        user_id: 1,
        title: "Rivers".to_owned(),
    })
    .await
    .expect("deck creation should succeed");

    let add = AddCardUseCase {
        decks: decks.clone(),
        cards: cards.clone(),
    };
    let mut expected = vec![first.id];
    for _ in 0..4 {
        let card = add
            .execute(AddCardInput {
                user_id: 1,
                deck_id: deck.id,
            })
            .await
            .expect("adding a card should succeed");
        expected.push(card.id);
    }

    let study = StudyDeckUseCase { decks, cards };
    let set = study
        .execute(StudyDeckInput {
            user_id: 1,
            deck_id: deck.id,
        })
        .await
        .expect("study should succeed");

    let mut seen: Vec<i32> = set.cards.iter().map(|card| card.id).collect();
    seen.sort_unstable();
    assert_eq!(seen, expected, "every card appears exactly once");
}

#[tokio::test]
async fn should_keep_other_users_out_of_a_deck() {
    let store = shared_deck_store();
    let decks = MockDecks::over(&store);
    let cards = MockCards::over(&store);

    let (deck, card) = CreateDeckUseCase {
        decks: decks.clone(),
    }
    .execute(CreateDeckInput {
        user_id: 1,
        title: "Private".to_owned(),
    })
    .await
    .expect("deck creation should succeed");

    let listed = ListDecksUseCase {
        decks: decks.clone(),
    }
    .execute(ListDecksInput { user_id: 2 })
    .await
    .expect("listing should succeed");
    assert!(listed.is_empty(), "user 2 sees no decks, got {listed:?}");

    let edit = EditCardUseCase {
        decks: decks.clone(),
        cards: cards.clone(),
    }
    .execute(EditCardInput {
        user_id: 2,
        deck_id: deck.id,
        card_id: card.id,
    })
    .await;
    assert!(
        matches!(edit, Err(WebError::NotFound)),
        "expected NotFound, got {edit:?}"
    );

    let save = SaveCardUseCase {
        cards: cards.clone(),
    }
    .execute(SaveCardInput {
        user_id: 2,
        card_id: card.id,
        question: Some("hijacked".to_owned()),
        answer: None,
    })
    .await;
    assert!(
        matches!(save, Err(WebError::NotFound)),
        "expected NotFound, got {save:?}"
    );

    let delete = DeleteDeckUseCase {
        decks: decks.clone(),
    }
    .execute(DeleteDeckInput {
        user_id: 2,
        deck_id: deck.id,
    })
    .await;
    assert!(
        matches!(delete, Err(WebError::NotFound)),
        "expected NotFound, got {delete:?}"
    );

    let still_there = ListDecksUseCase { decks }
        .execute(ListDecksInput { user_id: 1 })
        .await
        .expect("listing should succeed");
    assert_eq!(still_there.len(), 1, "the owner still has the deck");
}

#[tokio::test]
async fn should_remove_cards_with_their_deck() {
    let store = shared_deck_store();
    let decks = MockDecks::over(&store);
    let cards = MockCards::over(&store);

    let (deck, _) = CreateDeckUseCase {
        decks: decks.clone(),
    }
    .execute(CreateDeckInput {
        user_id: 1,
        title: "Doomed".to_owned(),
    })
    .await
    .expect("deck creation should succeed");

    let add = AddCardUseCase {
        decks: decks.clone(),
        cards,
    };
    add.execute(AddCardInput {
        user_id: 1,
        deck_id: deck.id,
    })
    .await
    .expect("adding a card should succeed");

    DeleteDeckUseCase { decks }
        .execute(DeleteDeckInput {
            user_id: 1,
            deck_id: deck.id,
        })
        .await
        .expect("deletion should succeed");

    let store = store.lock().unwrap();
    assert!(store.decks.is_empty(), "the deck row is gone");
    assert!(
        store.cards.is_empty(),
        "expected the deck's cards to go with it, got {:?}",
        store.cards
    );
}

#[tokio::test]
async fn should_open_the_editor_at_the_latest_card() {
    let store = shared_deck_store();
    let decks = MockDecks::over(&store);
    let cards = MockCards::over(&store);

    let (deck, _) = CreateDeckUseCase {
        decks: decks.clone(),
    }
    .execute(CreateDeckInput {
        user_id: 1,
        title: "Verbs".to_owned(),
    })
    .await
    .expect("deck creation should succeed");

    let newest = AddCardUseCase {
        decks: decks.clone(),
        cards: cards.clone(),
    }
    .execute(AddCardInput {
        user_id: 1,
        deck_id: deck.id,
    })
    .await
    .expect("adding a card should succeed");

    let target = OpenDeckEditorUseCase { decks, cards }
        .execute(OpenDeckEditorInput {
            user_id: 1,
            deck_id: deck.id,
        })
        .await
        .expect("the editor entry point should resolve");

    assert_eq!(target.deck_id, deck.id);
    assert_eq!(target.card_id, newest.id);
}

#[tokio::test]
async fn should_backfill_a_blank_card_for_an_emptied_deck() {
    let store = shared_deck_store();
    let decks = MockDecks::over(&store);
    let cards = MockCards::over(&store);

    let (deck, only) = CreateDeckUseCase {
        decks: decks.clone(),
    }
    .execute(CreateDeckInput {
        user_id: 1,
        title: "Hollow".to_owned(),
    })
    .await
    .expect("deck creation should succeed");

    let parent = DeleteCardUseCase {
        cards: cards.clone(),
    }
    .execute(DeleteCardInput {
        user_id: 1,
        card_id: only.id,
    })
    .await
    .expect("card deletion should succeed");
    assert_eq!(parent, deck.id, "deletion reports the parent deck");

    let target = OpenDeckEditorUseCase { decks, cards }
        .execute(OpenDeckEditorInput {
            user_id: 1,
            deck_id: deck.id,
        })
        .await
        .expect("the editor entry point should resolve");
    assert_ne!(target.card_id, only.id, "the deleted card does not come back");

    let store = store.lock().unwrap();
    assert_eq!(store.cards.len(), 1, "a fresh blank card was created");
    assert_eq!(store.cards[0].id, target.card_id);
    assert_eq!(store.cards[0].question, "");
    assert_eq!(store.cards[0].answer, "");
}

#[tokio::test]
async fn should_deliver_a_flash_message_only_once() {
    let sessions = MockSessions::empty();
    let record = authenticated_session(1, "test-key".to_owned());
    sessions
        .create(&record)
        .await
        .expect("session creation should succeed");

    sessions
        .set_message(&record.id, "Deck deleted successfully!")
        .await
        .expect("setting the flash should succeed");

    let first = sessions
        .take_message(&record.id)
        .await
        .expect("taking the flash should succeed");
    assert_eq!(first.as_deref(), Some("Deck deleted successfully!"));

    let second = sessions
        .take_message(&record.id)
        .await
        .expect("taking the flash should succeed");
    assert_eq!(second, None, "a flash must not survive its first read");
}

#[tokio::test]
async fn should_hand_the_flash_to_a_single_reader() {
    let sessions = MockSessions::empty();
    let record = authenticated_session(1, "test-key".to_owned());
    sessions
        .create(&record)
        .await
        .expect("session creation should succeed");
    sessions
        .set_message(&record.id, "Deck deleted successfully!")
        .await
        .expect("setting the flash should succeed");

    // two pages rendering off the same session at once
    let (a, b) = tokio::join!(
        sessions.take_message(&record.id),
        sessions.take_message(&record.id)
    );
    let taken = [
        a.expect("taking the flash should succeed"),
        b.expect("taking the flash should succeed"),
    ];
    assert_eq!(
        taken.iter().flatten().count(),
        1,
        "exactly one reader gets the flash, got {taken:?}"
    );
}

#[tokio::test]
async fn should_sweep_only_expired_sessions() {
    let sessions = MockSessions::empty();

    let live = authenticated_session(1, "test-key".to_owned());
    sessions
        .create(&live)
        .await
        .expect("session creation should succeed");

    let mut stale = authenticated_session(2, "test-key".to_owned());
    stale.expires_at = Utc::now() - Duration::hours(1);
    sessions
        .create(&stale)
        .await
        .expect("session creation should succeed");

    let lapsed = sessions
        .find_valid(&stale.id)
        .await
        .expect("lookup should succeed");
    assert!(lapsed.is_none(), "an expired session must not authenticate");

    let removed = sessions
        .delete_expired()
        .await
        .expect("the sweep should succeed");
    assert_eq!(removed, 1);

    let survivor = sessions
        .find_valid(&live.id)
        .await
        .expect("lookup should succeed");
    assert!(survivor.is_some(), "live sessions survive the sweep");
}
