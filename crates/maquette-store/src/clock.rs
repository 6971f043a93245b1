//! Timestamp-derived identifiers.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as epoch milliseconds, in string form.
///
/// Default identifier for projects, uploads, and exports. Two calls within
/// the same millisecond produce the same id; collisions are not guarded.
pub fn millis_id() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_numeric_string() {
        let id = millis_id();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn is_monotonic_across_a_sleep() {
        let a: u128 = millis_id().parse().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let b: u128 = millis_id().parse().unwrap();
        assert!(b > a);
    }
}
