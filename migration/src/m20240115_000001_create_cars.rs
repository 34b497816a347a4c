use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Car::Table)
                    .if_not_exists()
                    .col(pk_auto(Car::Id))
                    .col(string(Car::Name).not_null())
                    .col(string_null(Car::Category))
                    .col(string_null(Car::Price))
                    .col(string_null(Car::Image))
                    .col(json_binary(Car::Features).not_null())
                    .col(json_binary(Car::Details).not_null())
                    .col(integer(Car::Quantity).not_null().default(1))
                    .col(json_binary(Car::Tags).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Car::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Car {
    Table,
    Id,
    Name,
    Category,
    Price,
    Image,
    Features,
    Details,
    Quantity,
    Tags,
}
