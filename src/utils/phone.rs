use rand::seq::SliceRandom;
use rand::Rng;

pub const COUNTRY_CODE: &str = "+260";

/// Zambian mobile carrier prefixes (Airtel, MTN, Zamtel).
pub const CARRIER_PREFIXES: &[&str] = &["097", "096", "095", "077", "076"];

/// Generate a synthetic Zambian mobile number: country code, carrier prefix
/// and a 7-digit subscriber number.
pub fn generate_phone_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = CARRIER_PREFIXES.choose(rng).copied().unwrap_or(CARRIER_PREFIXES[0]);
    let subscriber: u32 = rng.gen_range(1_000_000..=9_999_999);
    format!("{COUNTRY_CODE}{prefix}{subscriber}")
}
