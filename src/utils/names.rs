//! Static passenger name lists used whenever the inference endpoint is
//! unavailable or returns something unusable.

use rand::seq::SliceRandom;
use rand::Rng;

pub const FIRST_NAMES: &[&str] = &[
    "Chanda", "Mwansa", "Banda", "Phiri", "Mulenga", "Tembo", "Zulu", "Lungu", "Musonda",
    "Kunda", "Chilufya", "Mutale", "Bwalya", "Kabwe", "Chishimba", "Mwila", "Sakala",
];

pub const LAST_NAMES: &[&str] = &[
    "Banda", "Mwansa", "Phiri", "Tembo", "Mulenga", "Zulu", "Lungu", "Musonda", "Chanda",
    "Kunda", "Siame", "Hichilema", "Mumba", "Ng'ombe", "Sakala", "Bwalya",
];

/// Pick a first and last name independently, with replacement.
pub fn fallback_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or(FIRST_NAMES[0]);
    let last = LAST_NAMES.choose(rng).copied().unwrap_or(LAST_NAMES[0]);
    format!("{first} {last}")
}

/// True when `name` is a `first last` pair drawn from the static lists.
pub fn is_fallback_name(name: &str) -> bool {
    match name.split_once(' ') {
        Some((first, last)) => FIRST_NAMES.contains(&first) && LAST_NAMES.contains(&last),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_name_comes_from_lists() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let name = fallback_name(&mut rng);
            assert!(is_fallback_name(&name), "{name}");
        }
    }

    #[test]
    fn test_is_fallback_name_rejects_partial() {
        assert!(!is_fallback_name("Chanda"));
        assert!(!is_fallback_name(""));
        assert!(!is_fallback_name("Chanda Smith"));
    }
}
