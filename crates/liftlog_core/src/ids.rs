//! Record identifiers.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an exercise definition.
///
/// Ids are opaque lowercase base36 strings: the creation time in Unix
/// milliseconds, followed by five random characters. They are:
/// - Unique within a store (random tail disambiguates same-millisecond ids)
/// - Immutable once assigned
/// - Roughly creation-ordered when compared as strings of equal length
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(String);

impl ExerciseId {
    /// Generates a fresh id from the current time.
    #[must_use]
    pub fn generate() -> Self {
        Self(generate_id(Utc::now()))
    }

    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ExerciseId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ExerciseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a logged set.
///
/// Same format as [`ExerciseId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetId(String);

impl SetId {
    /// Generates a fresh id from the current time.
    #[must_use]
    pub fn generate() -> Self {
        Self(generate_id(Utc::now()))
    }

    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

const RANDOM_SUFFIX_LEN: usize = 5;

fn generate_id(at: DateTime<Utc>) -> String {
    let millis = at.timestamp_millis().max(0) as u64;
    let mut id = to_base36(millis);
    let mut rng = rand::thread_rng();
    for _ in 0..RANDOM_SUFFIX_LEN {
        let digit = rng.gen_range(0..36u32);
        id.push(char::from_digit(digit, 36).unwrap_or('0'));
    }
    id
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        let digit = (n % 36) as u32;
        digits.push(char::from_digit(digit, 36).unwrap_or('0'));
        n /= 36;
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    #[test]
    fn base36_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(12_345), "9ix");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn generated_ids_have_time_prefix_and_suffix() {
        let at = Utc.with_ymd_and_hms(2024, 2, 6, 12, 0, 0).unwrap();
        let id = generate_id(at);
        let prefix = to_base36(at.timestamp_millis() as u64);
        assert!(id.starts_with(&prefix));
        assert_eq!(id.len(), prefix.len() + RANDOM_SUFFIX_LEN);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<String> = (0..64).map(|_| ExerciseId::generate().0).collect();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn display_matches_inner() {
        let id = ExerciseId::from("abc123");
        assert_eq!(id.to_string(), "abc123");
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn serde_is_transparent() {
        let id = SetId::from("ls3k9x0f2");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ls3k9x0f2\"");
        let back: SetId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
