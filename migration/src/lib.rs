pub use sea_orm_migration::prelude::*;

mod m20240115_000001_create_cars;
mod m20240115_000002_create_bookings;
mod m20240115_000003_create_comments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240115_000001_create_cars::Migration),
            Box::new(m20240115_000002_create_bookings::Migration),
            Box::new(m20240115_000003_create_comments::Migration),
        ]
    }
}
