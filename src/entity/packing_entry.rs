use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "packing_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub trip_id: Uuid,
    pub item_id: Uuid,
    pub bag_id: Option<Uuid>,
    pub quantity: i32,
    pub status: String,
    pub created_at: TimeDateTimeWithTimeZone,
    pub updated_at: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trip::Entity",
        from = "Column::TripId",
        to = "super::trip::Column::Id"
    )]
    Trip,
    #[sea_orm(
        belongs_to = "super::item_template::Entity",
        from = "Column::ItemId",
        to = "super::item_template::Column::Id"
    )]
    ItemTemplate,
    #[sea_orm(
        belongs_to = "super::bag_template::Entity",
        from = "Column::BagId",
        to = "super::bag_template::Column::Id"
    )]
    BagTemplate,
}

impl Related<super::trip::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trip.def()
    }
}

impl Related<super::item_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemTemplate.def()
    }
}

impl Related<super::bag_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BagTemplate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
