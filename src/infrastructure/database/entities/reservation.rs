//! Reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub room_number: i32,

    #[sea_orm(primary_key, auto_increment = false)]
    pub day: Date,

    pub client_id: i32,
    pub guests: i32,

    #[sea_orm(nullable)]
    pub arrival_time: Option<Time>,

    pub business_trip: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomNumber",
        to = "super::room::Column::Number"
    )]
    Room,
    #[sea_orm(
        belongs_to = "super::calendar_day::Entity",
        from = "Column::Day",
        to = "super::calendar_day::Column::Day"
    )]
    CalendarDay,
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::calendar_day::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CalendarDay.def()
    }
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
