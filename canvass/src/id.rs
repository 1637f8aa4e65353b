//! Identifier generation for surveys, questions, options, and responses.

use chrono::Utc;

const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a string identifier unique among all identifiers produced
/// within this process: the current millisecond timestamp in base-36,
/// followed by a random base-36 suffix.
///
/// No ordering guarantee beyond uniqueness; collision probability is
/// negligible at single-user scale (thousands of entities).
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis().unsigned_abs();
    let suffix: u64 = rand::random();
    format!("{}-{}", to_base36(millis), to_base36(suffix))
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.iter().rev().map(|&d| d as char).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn base36_digits() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(36 * 36 + 1), "101");
    }

    #[test]
    fn ids_are_unique_at_tool_scale() {
        let ids: HashSet<String> = (0..5_000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 5_000);
    }

    #[test]
    fn id_has_timestamp_and_suffix() {
        let id = generate_id();
        let parts: Vec<&str> = id.splitn(2, '-').collect();
        assert_eq!(parts.len(), 2);
        assert!(!parts[0].is_empty());
        assert!(!parts[1].is_empty());
    }
}
