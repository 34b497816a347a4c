use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// JSONB list column. Keeps features/details/tags structured end-to-end
/// instead of round-tripping through encoded strings.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult,
)]
#[serde(transparent)]
pub struct StringList(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "car")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub category: Option<String>,
    /// Display price, e.g. "120 000 FCFA/day". Opaque to the backend.
    pub price: Option<String>,
    pub image: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub features: StringList,
    #[sea_orm(column_type = "JsonBinary")]
    pub details: StringList,
    /// Units currently free for new bookings. Never negative.
    pub quantity: i32,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: StringList,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
