//! Content signatures for board collections
//!
//! Two fetches of the same data must produce the same signature no matter
//! which order the server returned rows in, so every collection is sorted by
//! id before hashing. Field values go in verbatim; only timestamps are
//! rendered in one canonical form.

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

/// A row that can be reduced to a stable text form
pub trait Fingerprint {
    fn sort_key(&self) -> i64;
    fn fingerprint(&self) -> String;
}

/// Incremental signature over several named collections
#[derive(Default)]
pub struct SignatureBuilder {
    hasher: Sha256,
}

impl SignatureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section<T: Fingerprint>(mut self, name: &str, rows: &[T]) -> Self {
        let mut lines: Vec<(i64, String)> = rows
            .iter()
            .map(|row| (row.sort_key(), row.fingerprint()))
            .collect();
        lines.sort();

        self.hasher.update(name.as_bytes());
        self.hasher.update([0x1e]);
        for (_, line) in lines {
            self.hasher.update(line.as_bytes());
            self.hasher.update([b'\n']);
        }
        self.hasher.update([0x1d]);
        self
    }

    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

/// Signature of a single collection.
pub fn collection_signature<T: Fingerprint>(rows: &[T]) -> String {
    SignatureBuilder::new().section("rows", rows).finish()
}

/// Canonical timestamp text used inside fingerprints.
pub fn timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(i64, &'static str);

    impl Fingerprint for Row {
        fn sort_key(&self) -> i64 {
            self.0
        }
        fn fingerprint(&self) -> String {
            format!("{}|{:?}", self.0, self.1)
        }
    }

    #[test]
    fn test_signature_ignores_order() {
        let a = vec![Row(1, "x"), Row(2, "y")];
        let b = vec![Row(2, "y"), Row(1, "x")];
        assert_eq!(collection_signature(&a), collection_signature(&b));
    }

    #[test]
    fn test_signature_detects_changes() {
        let a = vec![Row(1, "x"), Row(2, "y")];
        let b = vec![Row(1, "x"), Row(2, "z")];
        assert_ne!(collection_signature(&a), collection_signature(&b));
    }

    #[test]
    fn test_sections_are_separated() {
        let rows = vec![Row(1, "x")];
        let empty: Vec<Row> = Vec::new();
        let left = SignatureBuilder::new()
            .section("a", &rows)
            .section("b", &empty)
            .finish();
        let right = SignatureBuilder::new()
            .section("a", &empty)
            .section("b", &rows)
            .finish();
        assert_ne!(left, right);
    }

    #[test]
    fn test_signature_is_case_sensitive() {
        let a = vec![Row(1, "standup")];
        let b = vec![Row(1, "Standup")];
        assert_ne!(collection_signature(&a), collection_signature(&b));

        let a = vec![Row(1, "#ABCDEF")];
        let b = vec![Row(1, "#abcdef")];
        assert_ne!(collection_signature(&a), collection_signature(&b));
    }

    #[test]
    fn test_timestamp_is_canonical() {
        use chrono::TimeZone;
        let at = Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
        assert_eq!(timestamp(&at), "2024-05-10T09:00:00Z");
    }
}
