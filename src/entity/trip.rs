use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub start_date: TimeDate,
    pub end_date: TimeDate,
    pub created_at: TimeDateTimeWithTimeZone,
    pub updated_at: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::trip_bag::Entity")]
    TripBags,
    #[sea_orm(has_many = "super::packing_entry::Entity")]
    PackingEntries,
}

impl Related<super::trip_bag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TripBags.def()
    }
}

impl Related<super::packing_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PackingEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
