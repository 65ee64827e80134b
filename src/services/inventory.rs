use std::collections::HashSet;

use sea_orm::prelude::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType, Order, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

use crate::entities::booking::{self, STATUS_CONFIRMED};
use crate::entities::{bus, operator, route};
use crate::error::AppResult;

/// A bus with open seats, joined with its operator and route.
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct BusInfo {
    pub bus_id: i32,
    pub route_id: i32,
    pub total_seats: i32,
    pub departure_time: String,
    pub price: Decimal,
    pub operator_name: String,
    pub from_city: String,
    pub to_city: String,
}

impl BusInfo {
    pub fn route_label(&self) -> String {
        format!("{} → {}", self.from_city, self.to_city)
    }
}

#[derive(Debug, FromQueryResult)]
struct BookedSeat {
    seat_number: String,
}

#[derive(Debug, FromQueryResult)]
struct BusCapacity {
    total_seats: i32,
}

/// Pick one bus uniformly at random among those with available seats.
pub async fn find_random_bus<C: ConnectionTrait>(db: &C) -> AppResult<Option<BusInfo>> {
    let bus = bus::Entity::find()
        .select_only()
        .column_as(bus::Column::Id, "bus_id")
        .column(bus::Column::RouteId)
        .column(bus::Column::TotalSeats)
        .column_as(Expr::cust("\"buses\".\"departure_time\"::text"), "departure_time")
        .column(bus::Column::Price)
        .column_as(operator::Column::Name, "operator_name")
        .column(route::Column::FromCity)
        .column(route::Column::ToCity)
        .join(JoinType::InnerJoin, bus::Relation::Operator.def())
        .join(JoinType::InnerJoin, bus::Relation::Route.def())
        .filter(bus::Column::AvailableSeats.gt(0))
        .order_by(Expr::cust("RANDOM()"), Order::Asc)
        .into_model::<BusInfo>()
        .one(db)
        .await?;

    Ok(bus)
}

/// Lowest-numbered seat label in `01..=total_seats` that is not booked.
pub fn first_free_seat(total_seats: i32, booked: &HashSet<String>) -> Option<String> {
    (1..=total_seats)
        .map(|seat| format!("{seat:02}"))
        .find(|label| !booked.contains(label))
}

/// Find the first free seat on `bus_id`.
///
/// This read happens outside the write transaction, so two concurrent runs
/// can pick the same seat.
pub async fn find_available_seat<C: ConnectionTrait>(
    db: &C,
    bus_id: i32,
) -> AppResult<Option<String>> {
    let booked: HashSet<String> = booking::Entity::find()
        .select_only()
        .column(booking::Column::SeatNumber)
        .filter(booking::Column::BusId.eq(bus_id))
        .filter(booking::Column::Status.eq(STATUS_CONFIRMED))
        .into_model::<BookedSeat>()
        .all(db)
        .await?
        .into_iter()
        .map(|b| b.seat_number)
        .collect();

    let capacity = bus::Entity::find_by_id(bus_id)
        .select_only()
        .column(bus::Column::TotalSeats)
        .into_model::<BusCapacity>()
        .one(db)
        .await?;

    let Some(capacity) = capacity else {
        tracing::warn!("Bus {} disappeared while allocating a seat", bus_id);
        return Ok(None);
    };

    Ok(first_free_seat(capacity.total_seats, &booked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn seats(labels: &[&str]) -> HashSet<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn seat_row(label: &str) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("seat_number", Value::from(label.to_string()))])
    }

    fn capacity_row(total: i32) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("total_seats", Value::from(total))])
    }

    #[test]
    fn test_first_free_seat_skips_booked() {
        assert_eq!(first_free_seat(2, &seats(&["01"])).as_deref(), Some("02"));
        assert_eq!(first_free_seat(5, &seats(&["02", "03"])).as_deref(), Some("01"));

        let first_nine: HashSet<String> = (1..=9).map(|s| format!("0{s}")).collect();
        assert_eq!(first_free_seat(12, &first_nine).as_deref(), Some("10"));
    }

    #[test]
    fn test_first_free_seat_full_or_empty_bus() {
        assert_eq!(first_free_seat(3, &seats(&["01", "02", "03"])), None);
        assert_eq!(first_free_seat(0, &HashSet::new()), None);
        assert_eq!(first_free_seat(-4, &HashSet::new()), None);
    }

    #[test]
    fn test_first_free_seat_is_in_range_and_unbooked() {
        for total in 1..=60 {
            for taken in 0..total {
                let booked: HashSet<String> =
                    (1..=taken).map(|s| format!("{s:02}")).collect();
                let seat = first_free_seat(total, &booked).unwrap();
                let number: i32 = seat.parse().unwrap();
                assert_eq!(seat.len(), 2);
                assert!((1..=total).contains(&number));
                assert!(!booked.contains(&seat));
            }
        }
    }

    #[test]
    fn test_unpadded_labels_do_not_count_as_booked() {
        assert_eq!(first_free_seat(2, &seats(&["1"])).as_deref(), Some("01"));
    }

    #[tokio::test]
    async fn test_find_available_seat_second_of_two() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![seat_row("01")]])
            .append_query_results([vec![capacity_row(2)]])
            .into_connection();

        let seat = find_available_seat(&db, 7).await.unwrap();
        assert_eq!(seat.as_deref(), Some("02"));
    }

    #[tokio::test]
    async fn test_find_available_seat_full_bus() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![seat_row("01"), seat_row("02")]])
            .append_query_results([vec![capacity_row(2)]])
            .into_connection();

        assert_eq!(find_available_seat(&db, 7).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_available_seat_missing_bus() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();

        assert_eq!(find_available_seat(&db, 99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_random_bus_maps_joined_row() {
        let row = BTreeMap::from([
            ("bus_id", Value::from(3)),
            ("route_id", Value::from(1)),
            ("total_seats", Value::from(45)),
            ("departure_time", Value::from("06:00:00".to_string())),
            ("price", Value::from(Decimal::new(35000, 2))),
            ("operator_name", Value::from("Mazhandu Family".to_string())),
            ("from_city", Value::from("Lusaka".to_string())),
            ("to_city", Value::from("Livingstone".to_string())),
        ]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();

        let bus = find_random_bus(&db).await.unwrap().unwrap();
        assert_eq!(bus.bus_id, 3);
        assert_eq!(bus.price, Decimal::new(35000, 2));
        assert_eq!(bus.route_label(), "Lusaka → Livingstone");
    }

    #[tokio::test]
    async fn test_find_random_bus_none_available() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();

        assert_eq!(find_random_bus(&db).await.unwrap(), None);
    }
}
