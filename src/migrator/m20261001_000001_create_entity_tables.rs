use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EntityRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EntityRecords::Seq)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EntityRecords::Collection).string().not_null())
                    .col(ColumnDef::new(EntityRecords::RecordId).string().not_null())
                    .col(ColumnDef::new(EntityRecords::Body).json().not_null())
                    .col(
                        ColumnDef::new(EntityRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Backs the reject-on-collision create policy.
        manager
            .create_index(
                Index::create()
                    .name("idx_entity_records_collection_record_id")
                    .table(EntityRecords::Table)
                    .col(EntityRecords::Collection)
                    .col(EntityRecords::RecordId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EntitySeeds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EntitySeeds::Collection)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EntitySeeds::SeededAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EntitySeeds::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EntityRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum EntityRecords {
    Table,
    Seq,
    Collection,
    RecordId,
    Body,
    CreatedAt,
}

#[derive(DeriveIden)]
enum EntitySeeds {
    Table,
    Collection,
    SeededAt,
}
