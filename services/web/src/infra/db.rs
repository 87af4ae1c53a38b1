use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionTrait, sea_query::Expr,
};

use kartei_schema::{decks, flashcards, sessions, users};

use crate::domain::repository::{
    CardRepository, DeckRepository, SessionRepository, UserRepository,
};
use crate::domain::types::{CardNeighbors, Deck, DeckSummary, Flashcard, SessionRecord, User};
use crate::error::WebError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, WebError> {
        let result = users::ActiveModel {
            email: Set(email.to_owned()),
            password_hash: Set(password_hash.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(model) => Ok(user_from_model(model)),
            // the unique index on email is the source of truth for
            // duplicate registration
            Err(e) if is_unique_violation(&e) => Err(WebError::EmailTaken),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, WebError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, WebError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at,
    }
}

// ── Deck repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDeckRepository {
    pub db: DatabaseConnection,
}

impl DeckRepository for DbDeckRepository {
    async fn list_with_counts(&self, user_id: i32) -> Result<Vec<DeckSummary>, WebError> {
        use sea_orm::{ConnectionTrait, FromQueryResult, Statement};

        #[derive(Debug, FromQueryResult)]
        struct DeckCountRow {
            id: i32,
            title: String,
            card_count: i64,
        }

        let sql = r#"
            SELECT d.id, d.title, COUNT(f.id) AS card_count
            FROM decks d
            LEFT JOIN flashcards f ON f.deck_id = d.id
            WHERE d.user_id = $1
            GROUP BY d.id, d.title
            ORDER BY d.id DESC
        "#;

        let rows = DeckCountRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            [user_id.into()],
        ))
        .all(&self.db)
        .await
        .context("list decks with card counts")?;

        Ok(rows
            .into_iter()
            .map(|row| DeckSummary {
                id: row.id,
                title: row.title,
                card_count: row.card_count,
            })
            .collect())
    }

    async fn create_with_initial_card(
        &self,
        user_id: i32,
        title: &str,
    ) -> Result<(Deck, Flashcard), WebError> {
        let title = title.to_owned();
        let (deck, card) = self
            .db
            .transaction::<_, (decks::Model, flashcards::Model), DbErr>(move |txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    let deck = decks::ActiveModel {
                        title: Set(title),
                        user_id: Set(user_id),
                        created_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    let card = flashcards::ActiveModel {
                        deck_id: Set(deck.id),
                        question: Set(String::new()),
                        answer: Set(String::new()),
                        created_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    Ok((deck, card))
                })
            })
            .await
            .context("create deck with initial card")?;
        Ok((deck_from_model(deck), card_from_model(card)))
    }

    async fn find_owned(&self, deck_id: i32, user_id: i32) -> Result<Option<Deck>, WebError> {
        let model = decks::Entity::find_by_id(deck_id)
            .filter(decks::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find deck by id and owner")?;
        Ok(model.map(deck_from_model))
    }

    async fn delete_owned(&self, deck_id: i32, user_id: i32) -> Result<bool, WebError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(move |txn| {
                Box::pin(async move {
                    // ownership first: an unowned deck must lose nothing,
                    // not even its cards
                    let deck = decks::Entity::find_by_id(deck_id)
                        .filter(decks::Column::UserId.eq(user_id))
                        .one(txn)
                        .await?;
                    if deck.is_none() {
                        return Ok(false);
                    }

                    flashcards::Entity::delete_many()
                        .filter(flashcards::Column::DeckId.eq(deck_id))
                        .exec(txn)
                        .await?;

                    decks::Entity::delete_many()
                        .filter(decks::Column::Id.eq(deck_id))
                        .filter(decks::Column::UserId.eq(user_id))
                        .exec(txn)
                        .await?;

                    Ok(true)
                })
            })
            .await
            .context("delete deck with cards")?;
        Ok(deleted)
    }
}

fn deck_from_model(model: decks::Model) -> Deck {
    Deck {
        id: model.id,
        title: model.title,
        user_id: model.user_id,
        created_at: model.created_at,
    }
}

// ── Card repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCardRepository {
    pub db: DatabaseConnection,
}

impl CardRepository for DbCardRepository {
    async fn add_blank(&self, deck_id: i32) -> Result<Flashcard, WebError> {
        let model = flashcards::ActiveModel {
            deck_id: Set(deck_id),
            question: Set(String::new()),
            answer: Set(String::new()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("insert blank card")?;
        Ok(card_from_model(model))
    }

    async fn find_in_deck(
        &self,
        card_id: i32,
        deck_id: i32,
    ) -> Result<Option<Flashcard>, WebError> {
        let model = flashcards::Entity::find_by_id(card_id)
            .filter(flashcards::Column::DeckId.eq(deck_id))
            .one(&self.db)
            .await
            .context("find card in deck")?;
        Ok(model.map(card_from_model))
    }

    async fn find_owned(&self, card_id: i32, user_id: i32) -> Result<Option<Flashcard>, WebError> {
        let model = flashcards::Entity::find_by_id(card_id)
            .inner_join(decks::Entity)
            .filter(decks::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find card by id and owner")?;
        Ok(model.map(card_from_model))
    }

    async fn latest_in_deck(&self, deck_id: i32) -> Result<Option<Flashcard>, WebError> {
        let model = flashcards::Entity::find()
            .filter(flashcards::Column::DeckId.eq(deck_id))
            .order_by_desc(flashcards::Column::Id)
            .one(&self.db)
            .await
            .context("find latest card in deck")?;
        Ok(model.map(card_from_model))
    }

    async fn neighbors(&self, deck_id: i32, card_id: i32) -> Result<CardNeighbors, WebError> {
        let next = flashcards::Entity::find()
            .filter(flashcards::Column::DeckId.eq(deck_id))
            .filter(flashcards::Column::Id.gt(card_id))
            .order_by_asc(flashcards::Column::Id)
            .one(&self.db)
            .await
            .context("find next card")?;

        let prev = flashcards::Entity::find()
            .filter(flashcards::Column::DeckId.eq(deck_id))
            .filter(flashcards::Column::Id.lt(card_id))
            .order_by_desc(flashcards::Column::Id)
            .one(&self.db)
            .await
            .context("find previous card")?;

        Ok(CardNeighbors {
            prev_id: prev.map(|card| card.id),
            next_id: next.map(|card| card.id),
        })
    }

    async fn update_contents(
        &self,
        card_id: i32,
        question: &str,
        answer: &str,
    ) -> Result<(), WebError> {
        flashcards::Entity::update_many()
            .filter(flashcards::Column::Id.eq(card_id))
            .col_expr(flashcards::Column::Question, Expr::value(question))
            .col_expr(flashcards::Column::Answer, Expr::value(answer))
            .exec(&self.db)
            .await
            .context("update card contents")?;
        Ok(())
    }

    async fn delete(&self, card_id: i32) -> Result<(), WebError> {
        flashcards::Entity::delete_many()
            .filter(flashcards::Column::Id.eq(card_id))
            .exec(&self.db)
            .await
            .context("delete card")?;
        Ok(())
    }

    async fn list_for_deck(&self, deck_id: i32) -> Result<Vec<Flashcard>, WebError> {
        let models = flashcards::Entity::find()
            .filter(flashcards::Column::DeckId.eq(deck_id))
            .order_by_asc(flashcards::Column::Id)
            .all(&self.db)
            .await
            .context("list cards for deck")?;
        Ok(models.into_iter().map(card_from_model).collect())
    }
}

fn card_from_model(model: flashcards::Model) -> Flashcard {
    Flashcard {
        id: model.id,
        deck_id: model.deck_id,
        question: model.question,
        answer: model.answer,
        created_at: model.created_at,
    }
}

// ── Session repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSessionRepository {
    pub db: DatabaseConnection,
}

impl SessionRepository for DbSessionRepository {
    async fn create(&self, session: &SessionRecord) -> Result<(), WebError> {
        sessions::ActiveModel {
            id: Set(session.id.clone()),
            user_id: Set(session.user_id),
            api_key: Set(session.api_key.clone()),
            message: Set(session.message.clone()),
            created_at: Set(session.created_at),
            expires_at: Set(session.expires_at),
        }
        .insert(&self.db)
        .await
        .context("create session")?;
        Ok(())
    }

    async fn find_valid(&self, token: &str) -> Result<Option<SessionRecord>, WebError> {
        let model = sessions::Entity::find_by_id(token.to_owned())
            .filter(sessions::Column::ExpiresAt.gt(Utc::now()))
            .one(&self.db)
            .await
            .context("find valid session")?;
        Ok(model.map(session_from_model))
    }

    async fn take_message(&self, token: &str) -> Result<Option<String>, WebError> {
        use sea_orm::{ConnectionTrait, FromQueryResult, Statement};

        #[derive(FromQueryResult)]
        struct TakenMessage {
            message: Option<String>,
        }

        // read-and-clear in one statement, so two renders racing on the
        // same session cannot both observe the flash. RETURNING sees the
        // updated row; the pre-update value comes out of the locked
        // self-join.
        let sql = r#"
            UPDATE sessions
            SET message = NULL
            FROM (SELECT id, message FROM sessions WHERE id = $1 FOR UPDATE) prev
            WHERE sessions.id = prev.id
            RETURNING prev.message
        "#;

        let taken = TakenMessage::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            [token.into()],
        ))
        .one(&self.db)
        .await
        .context("take flash message")?;

        Ok(taken.and_then(|row| row.message))
    }

    async fn set_message(&self, token: &str, message: &str) -> Result<(), WebError> {
        sessions::Entity::update_many()
            .filter(sessions::Column::Id.eq(token))
            .col_expr(sessions::Column::Message, Expr::value(message))
            .exec(&self.db)
            .await
            .context("set flash message")?;
        Ok(())
    }

    async fn delete(&self, token: &str) -> Result<(), WebError> {
        sessions::Entity::delete_many()
            .filter(sessions::Column::Id.eq(token))
            .exec(&self.db)
            .await
            .context("delete session")?;
        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64, WebError> {
        let result = sessions::Entity::delete_many()
            .filter(sessions::Column::ExpiresAt.lte(Utc::now()))
            .exec(&self.db)
            .await
            .context("delete expired sessions")?;
        Ok(result.rows_affected)
    }
}

fn session_from_model(model: sessions::Model) -> SessionRecord {
    SessionRecord {
        id: model.id,
        user_id: model.user_id,
        api_key: model.api_key,
        message: model.message,
        created_at: model.created_at,
        expires_at: model.expires_at,
    }
}
