use sea_orm::DatabaseConnection;

use kartei_core::health::Readiness;

use crate::infra::db::{
    DbCardRepository, DbDeckRepository, DbSessionRepository, DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Auxiliary API key stamped onto sessions at login.
    pub api_key: String,
    pub readiness: Readiness,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn deck_repo(&self) -> DbDeckRepository {
        DbDeckRepository {
            db: self.db.clone(),
        }
    }

    pub fn card_repo(&self) -> DbCardRepository {
        DbCardRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_repo(&self) -> DbSessionRepository {
        DbSessionRepository {
            db: self.db.clone(),
        }
    }
}
