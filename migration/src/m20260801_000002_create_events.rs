use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create events table
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Events::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Events::Name).string().not_null())
                    .col(ColumnDef::new(Events::Description).text())
                    .col(ColumnDef::new(Events::Location).string())
                    .col(ColumnDef::new(Events::StartDatetime).big_integer().not_null())
                    .col(ColumnDef::new(Events::EndDatetime).big_integer().not_null())
                    .col(ColumnDef::new(Events::RegistrationStartDatetime).big_integer().not_null())
                    .col(ColumnDef::new(Events::RegistrationEndDatetime).big_integer().not_null())
                    .col(ColumnDef::new(Events::Photos).text().not_null().default("[]"))
                    .col(ColumnDef::new(Events::Category).string())
                    .col(ColumnDef::new(Events::Status).string_len(16).not_null().default("pending"))
                    .col(ColumnDef::new(Events::Flag).boolean().not_null().default(false))
                    .col(ColumnDef::new(Events::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Index for the public listing (status = approved AND flag = false)
        manager
            .create_index(
                Index::create()
                    .name("idx_events_status_flag")
                    .table(Events::Table)
                    .col(Events::Status)
                    .col(Events::Flag)
                    .to_owned(),
            )
            .await?;

        // Create user_events table (creator links)
        manager
            .create_table(
                Table::create()
                    .table(UserEvents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserEvents::UserId).integer().not_null())
                    .col(ColumnDef::new(UserEvents::EventId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_user_events")
                            .col(UserEvents::UserId)
                            .col(UserEvents::EventId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_events_user_id")
                            .from(UserEvents::Table, UserEvents::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_events_event_id")
                            .from(UserEvents::Table, UserEvents::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_events_event_id")
                    .table(UserEvents::Table)
                    .col(UserEvents::EventId)
                    .to_owned(),
            )
            .await?;

        // Create registered_events table (attendee links)
        manager
            .create_table(
                Table::create()
                    .table(RegisteredEvents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RegisteredEvents::UserId).integer().not_null())
                    .col(ColumnDef::new(RegisteredEvents::EventId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_registered_events")
                            .col(RegisteredEvents::UserId)
                            .col(RegisteredEvents::EventId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_registered_events_user_id")
                            .from(RegisteredEvents::Table, RegisteredEvents::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_registered_events_event_id")
                            .from(RegisteredEvents::Table, RegisteredEvents::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_registered_events_event_id")
                    .table(RegisteredEvents::Table)
                    .col(RegisteredEvents::EventId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RegisteredEvents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserEvents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Name,
    Description,
    Location,
    StartDatetime,
    EndDatetime,
    RegistrationStartDatetime,
    RegistrationEndDatetime,
    Photos,
    Category,
    Status,
    Flag,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserEvents {
    Table,
    UserId,
    EventId,
}

#[derive(DeriveIden)]
enum RegisteredEvents {
    Table,
    UserId,
    EventId,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
