//! Booking reference generation

use rand::Rng;

pub const HOTEL_PREFIX: &str = "HOTEL";

/// `HOTEL` followed by six digits, first digit non-zero.
pub fn hotel_reference<R: Rng>(rng: &mut R) -> String {
    let n: u32 = rng.random_range(100_000..1_000_000);
    format!("{}{}", HOTEL_PREFIX, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use regex::Regex;

    #[test]
    fn reference_matches_pattern() {
        let re = Regex::new(r"^HOTEL\d{6}$").unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let r = hotel_reference(&mut rng);
            assert!(re.is_match(&r), "bad reference {}", r);
            assert!(!r.starts_with("HOTEL0"));
        }
    }

    #[test]
    fn same_seed_same_reference() {
        let a = hotel_reference(&mut StdRng::seed_from_u64(7));
        let b = hotel_reference(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
