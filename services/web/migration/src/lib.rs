use sea_orm_migration::prelude::*;

mod m20260823_000001_create_users;
mod m20260823_000002_create_decks;
mod m20260823_000003_create_flashcards;
mod m20260823_000004_create_sessions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260823_000001_create_users::Migration),
            Box::new(m20260823_000002_create_decks::Migration),
            Box::new(m20260823_000003_create_flashcards::Migration),
            Box::new(m20260823_000004_create_sessions::Migration),
        ]
    }
}
