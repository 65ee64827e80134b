use chrono::{DateTime, Local, TimeZone};
use rand::Rng;

pub const REFERENCE_TAG: &str = "BK";

const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 4;

/// Generate a booking reference from the current local time.
///
/// Resolution is one second, so two references minted in the same second
/// only differ by their random suffix. The `bookings.booking_ref` unique
/// constraint is the final arbiter.
pub fn generate_booking_ref<R: Rng + ?Sized>(rng: &mut R) -> String {
    booking_ref_at(&Local::now(), rng)
}

pub fn booking_ref_at<Tz, R>(at: &DateTime<Tz>, rng: &mut R) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
    R: Rng + ?Sized,
{
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect();

    format!("{REFERENCE_TAG}{}{suffix}", at.format("%Y%m%d%H%M%S"))
}
