use chrono::Local;
use sea_orm::sea_query::{Expr, InsertStatement, Query};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    TransactionTrait,
};
use serde::Serialize;

use crate::entities::booking::{self, STATUS_CONFIRMED};
use crate::entities::bus;
use crate::error::AppResult;
use crate::services::inventory::BusInfo;
use crate::utils::reference::generate_booking_ref;
use crate::utils::travel::{travel_date_from, PaymentMethod};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BookingSummary {
    pub id: i32,
    pub reference: String,
    pub passenger: String,
    pub route: String,
    pub operator: String,
    pub seat: String,
}

/// Insert a confirmed booking for `seat` on `bus` and take one seat off the
/// bus's availability, both in one transaction.
pub async fn create_booking<C: TransactionTrait>(
    db: &C,
    bus: &BusInfo,
    seat: &str,
    passenger_name: &str,
    phone: &str,
) -> AppResult<BookingSummary> {
    let (travel_date, reference, payment_method) = {
        let mut rng = rand::thread_rng();
        (
            travel_date_from(Local::now().date_naive(), &mut rng),
            generate_booking_ref(&mut rng),
            PaymentMethod::random(&mut rng),
        )
    };
    // created_at/updated_at use the database clock
    let mut new_booking = Query::insert();
    new_booking
        .into_table(booking::Entity)
        .columns([
            booking::Column::BookingRef,
            booking::Column::PassengerName,
            booking::Column::PassengerPhone,
            booking::Column::BusId,
            booking::Column::SeatNumber,
            booking::Column::TravelDate,
            booking::Column::Status,
            booking::Column::PaymentMethod,
            booking::Column::TotalAmount,
            booking::Column::CreatedAt,
            booking::Column::UpdatedAt,
        ])
        .values([
            reference.clone().into(),
            passenger_name.into(),
            phone.into(),
            bus.bus_id.into(),
            seat.into(),
            travel_date.into(),
            STATUS_CONFIRMED.into(),
            payment_method.as_str().into(),
            bus.price.into(),
            Expr::current_timestamp().into(),
            Expr::current_timestamp().into(),
        ])
        .map_err(|e| DbErr::Custom(format!("Failed to build booking insert: {}", e)))?
        .returning_col(booking::Column::Id);

    let txn = db.begin().await?;
    let id = match insert_and_take_seat(&txn, new_booking, bus.bus_id).await {
        Ok(id) => id,
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!("Rollback failed: {}", rollback_err);
            }
            return Err(e);
        }
    };
    txn.commit().await?;

    tracing::debug!(booking_id = id, %reference, "Booking committed");

    Ok(BookingSummary {
        id,
        reference,
        passenger: passenger_name.to_string(),
        route: bus.route_label(),
        operator: bus.operator_name.clone(),
        seat: seat.to_string(),
    })
}

async fn insert_and_take_seat(
    txn: &DatabaseTransaction,
    new_booking: InsertStatement,
    bus_id: i32,
) -> AppResult<i32> {
    let id: i32 = txn
        .query_one(txn.get_database_backend().build(&new_booking))
        .await?
        .ok_or(DbErr::RecordNotInserted)?
        .try_get("", "id")?;

    bus::Entity::update_many()
        .col_expr(
            bus::Column::AvailableSeats,
            Expr::col(bus::Column::AvailableSeats).sub(1),
        )
        .col_expr(bus::Column::UpdatedAt, Expr::current_timestamp().into())
        .filter(bus::Column::Id.eq(bus_id))
        .exec(txn)
        .await?;

    Ok(id)
}
