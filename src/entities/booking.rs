use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const STATUS_CONFIRMED: &str = "confirmed";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub booking_ref: String,
    pub passenger_name: String,
    pub passenger_phone: String,
    pub bus_id: i32,
    /// Two-digit, zero-padded seat label ("01", "02", ...).
    pub seat_number: String,
    pub travel_date: Date,
    pub status: String,
    pub payment_method: String,
    pub total_amount: Decimal,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bus::Entity",
        from = "Column::BusId",
        to = "super::bus::Column::Id"
    )]
    Bus,
}

impl Related<super::bus::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
