//! Shared random value helpers: IP addresses, hex digests and timestamps.

use rand::Rng;

/// 2024-01-01T00:00:00Z in epoch milliseconds, the anchor of the generation window.
pub const BASE_TIMESTAMP_MS: i64 = 1_704_067_200_000;

/// Width of the generation window in days.
pub const TIME_RANGE_DAYS: i64 = 365;

pub const DAY_MS: i64 = 86_400_000;

/// Uniform timestamp within the one-year window, jittered within the day.
pub fn random_timestamp<R: Rng>(rng: &mut R) -> i64 {
    let days_offset = rng.gen_range(0..=TIME_RANGE_DAYS);
    BASE_TIMESTAMP_MS + days_offset * DAY_MS + rng.gen_range(0..DAY_MS)
}

/// Lowercase hex string of the given length, used for digests and suffixes.
pub fn hex_string<R: Rng>(rng: &mut R, len: usize) -> String {
    const HEX: &[u8] = b"0123456789abcdef";
    (0..len)
        .map(|_| HEX[rng.gen_range(0..HEX.len())] as char)
        .collect()
}

/// Private-range IPv4 address (192.168/10.0/172.16 subnets).
pub fn internal_ip<R: Rng>(rng: &mut R) -> String {
    let subnet = ["192.168", "10.0", "172.16"][rng.gen_range(0..3)];
    format!(
        "{}.{}.{}",
        subnet,
        rng.gen_range(0..=255),
        rng.gen_range(1..=254)
    )
}

/// Routable-looking IPv4 address.
pub fn external_ip<R: Rng>(rng: &mut R) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.gen_range(1..=223),
        rng.gen_range(0..=255),
        rng.gen_range(0..=255),
        rng.gen_range(1..=254)
    )
}

/// `SESSION-<YYYYmmdd-HHMMSS>-<nnn>` built from a fresh random timestamp.
pub fn session_id<R: Rng>(rng: &mut R) -> String {
    let ts = random_timestamp(rng);
    let stamp = chrono::DateTime::from_timestamp_millis(ts)
        .map(|dt| dt.format("%Y%m%d-%H%M%S").to_string())
        .unwrap_or_default();
    format!("SESSION-{}-{:03}", stamp, rng.gen_range(1..=999))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_timestamps_stay_in_window() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let ts = random_timestamp(&mut rng);
            assert!(ts >= BASE_TIMESTAMP_MS);
            assert!(ts < BASE_TIMESTAMP_MS + (TIME_RANGE_DAYS + 1) * DAY_MS);
        }
    }

    #[test]
    fn test_hex_string_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let digest = hex_string(&mut rng, 64);
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_internal_ip_subnets() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let ip = internal_ip(&mut rng);
            assert!(
                ip.starts_with("192.168.") || ip.starts_with("10.0.") || ip.starts_with("172.16."),
                "unexpected subnet: {ip}"
            );
        }
    }

    #[test]
    fn test_session_id_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = session_id(&mut rng);
        assert!(id.starts_with("SESSION-2024") || id.starts_with("SESSION-2025"));
        assert_eq!(id.len(), "SESSION-20240101-000000-001".len());
    }
}
