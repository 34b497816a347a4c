use sea_orm_migration::{prelude::*, schema::*};

use super::m20240115_000001_create_cars::Car;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(pk_auto(Comment::Id))
                    .col(integer(Comment::CarId).not_null())
                    .col(string(Comment::Author).not_null())
                    .col(
                        integer(Comment::Rating)
                            .not_null()
                            .check(Expr::col(Comment::Rating).between(1, 5)),
                    )
                    .col(text(Comment::CommentText).not_null())
                    .col(
                        timestamp_with_time_zone(Comment::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_car")
                            .from(Comment::Table, Comment::CarId)
                            .to(Car::Table, Car::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Comment {
    Table,
    Id,
    CarId,
    Author,
    Rating,
    CommentText,
    CreatedAt,
}
