//! Common types used across plugin and preset modules.

/// Timestamp wrapper for consistent serialization.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Get current UTC timestamp.
pub fn now() -> Timestamp {
    chrono::Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_serde() {
        let ts = now();
        let json = serde_json::to_string(&ts).unwrap();
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, parsed);
    }
}
