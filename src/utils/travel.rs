use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

pub const MIN_DAYS_AHEAD: i64 = 1;
pub const MAX_DAYS_AHEAD: i64 = 14;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PaymentMethod {
    MobileMoney,
    Cash,
    Card,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [Self::MobileMoney, Self::Cash, Self::Card];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MobileMoney => "mobile_money",
            Self::Cash => "cash",
            Self::Card => "card",
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&Self::Cash)
    }
}

/// A travel date between 1 and 14 days after `today`, inclusive.
pub fn travel_date_from<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> NaiveDate {
    today + Duration::days(rng.gen_range(MIN_DAYS_AHEAD..=MAX_DAYS_AHEAD))
}
