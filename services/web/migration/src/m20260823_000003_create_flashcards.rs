use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Flashcards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Flashcards::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Flashcards::DeckId).integer().not_null())
                    .col(ColumnDef::new(Flashcards::Question).text().not_null())
                    .col(ColumnDef::new(Flashcards::Answer).text().not_null())
                    .col(
                        ColumnDef::new(Flashcards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Flashcards::Table, Flashcards::DeckId)
                            .to(Decks::Table, Decks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Flashcards::Table)
                    .col(Flashcards::DeckId)
                    .name("idx_flashcards_deck_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Flashcards::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Flashcards {
    Table,
    Id,
    DeckId,
    Question,
    Answer,
    CreatedAt,
}

#[derive(Iden)]
enum Decks {
    Table,
    Id,
}
