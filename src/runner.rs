use std::fmt;

use rand::Rng;
use sea_orm::{ConnectionTrait, TransactionTrait};

use crate::error::{AppError, AppResult};
use crate::services::booking::{create_booking, BookingSummary};
use crate::services::inventory::{find_available_seat, find_random_bus};
use crate::services::names::NameGenerator;
use crate::utils::phone::generate_phone_number;

pub const DEFAULT_COUNT_RANGE: std::ops::RangeInclusive<u32> = 1..=3;

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub requested: u32,
    pub bookings: Vec<BookingSummary>,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} bookings created successfully",
            self.bookings.len(),
            self.requested
        )
    }
}

/// Turn the optional COUNT argument into a booking count, falling back to a
/// random 1..=3 when it is missing or not an integer. Negative counts mean
/// zero attempts.
pub fn resolve_count<R: Rng + ?Sized>(arg: Option<&str>, rng: &mut R) -> u32 {
    match arg.map(|raw| (raw, raw.trim().parse::<i64>())) {
        Some((_, Ok(count))) => u32::try_from(count.max(0)).unwrap_or(u32::MAX),
        Some((raw, Err(_))) => {
            tracing::warn!("Invalid count: {}, using random count", raw);
            rng.gen_range(DEFAULT_COUNT_RANGE)
        }
        None => rng.gen_range(DEFAULT_COUNT_RANGE),
    }
}

/// Attempt `count` bookings one after another. Failures are logged and
/// skipped; only the successful bookings are returned.
pub async fn generate_bookings<C>(db: &C, names: &NameGenerator, count: u32) -> RunReport
where
    C: ConnectionTrait + TransactionTrait,
{
    let mut bookings = Vec::new();

    for attempt in 1..=count {
        match generate_booking(db, names).await {
            Ok(booking) => {
                tracing::info!(
                    "Booking {}/{}: {} - {} - {} (Seat {})",
                    attempt,
                    count,
                    booking.reference,
                    booking.passenger,
                    booking.route,
                    booking.seat
                );
                bookings.push(booking);
            }
            Err(e @ (AppError::NoInventory | AppError::NoSeat(_))) => {
                tracing::warn!("Skipping booking {}/{}: {}", attempt, count, e);
            }
            Err(e) => {
                tracing::error!("Failed to create booking {}/{}: {}", attempt, count, e);
            }
        }
    }

    let report = RunReport {
        requested: count,
        bookings,
    };
    tracing::info!("Summary: {}", report);
    report
}

async fn generate_booking<C>(db: &C, names: &NameGenerator) -> AppResult<BookingSummary>
where
    C: ConnectionTrait + TransactionTrait,
{
    let bus = find_random_bus(db).await?.ok_or(AppError::NoInventory)?;
    let seat = find_available_seat(db, bus.bus_id)
        .await?
        .ok_or(AppError::NoSeat(bus.bus_id))?;

    let passenger_name = names.generate().await;
    let phone = generate_phone_number(&mut rand::thread_rng());

    create_booking(db, &bus, &seat, &passenger_name, &phone).await
}
