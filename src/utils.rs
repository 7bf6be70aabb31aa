/// Seconds since the unix epoch, with millisecond precision.
pub fn now_timestamp() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Compares two secrets without short-circuiting on the first mismatch.
pub fn secret_matches(expected: &str, provided: &[u8]) -> bool {
    let expected = expected.as_bytes();
    if expected.len() != provided.len() {
        return false;
    }
    expected
        .iter()
        .zip(provided)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_matches() {
        assert!(secret_matches("s3cr3t", b"s3cr3t"));
        assert!(!secret_matches("s3cr3t", b"s3cr3T"));
        assert!(!secret_matches("s3cr3t", b"s3cr3"));
        assert!(!secret_matches("", b"x"));
    }

    #[test]
    fn test_now_timestamp() {
        let before = chrono::Utc::now().timestamp() as f64;
        let now = now_timestamp();
        assert!(now >= before);
        assert!(now < before + 5.0);
    }
}
