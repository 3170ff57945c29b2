// src/process/group.rs

use std::{
    collections::{btree_map, BTreeMap},
    path::Path,
};
use tracing::debug;

use super::records::PostalRecord;
use crate::error::{Error, ParseErrorKind, Result};

/// Records of one bucket, keyed by full postal code.
pub type Bucket = BTreeMap<String, PostalRecord>;

/// Records partitioned by 3-digit postal-code prefix.
///
/// Both levels are ordered maps, so iterating (and serializing) a
/// `GroupedRecords` is deterministic for a given input.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GroupedRecords {
    buckets: BTreeMap<String, Bucket>,
}

/// The bucket a postal code belongs to: its first three characters,
/// which must be ASCII digits.
pub fn bucket_key(postal_code: &str) -> std::result::Result<&str, ParseErrorKind> {
    match postal_code.get(..3) {
        Some(head) if head.bytes().all(|b| b.is_ascii_digit()) => Ok(head),
        _ => Err(ParseErrorKind::PostalCodeTooShort(postal_code.to_string())),
    }
}

impl GroupedRecords {
    /// Insert `record`, replacing any earlier record with the same postal code.
    pub fn insert(&mut self, record: PostalRecord) -> std::result::Result<(), ParseErrorKind> {
        let key = bucket_key(&record.postal_code)?.to_string();
        self.buckets
            .entry(key)
            .or_default()
            .insert(record.postal_code.clone(), record);
        Ok(())
    }

    pub fn get(&self, postal_code: &str) -> Option<&PostalRecord> {
        let key = bucket_key(postal_code).ok()?;
        self.buckets.get(key)?.get(postal_code)
    }

    pub fn bucket(&self, key: &str) -> Option<&Bucket> {
        self.buckets.get(key)
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total records across all buckets.
    pub fn record_count(&self) -> usize {
        self.buckets.values().map(BTreeMap::len).sum()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Bucket> {
        self.buckets.iter()
    }
}

impl<'a> IntoIterator for &'a GroupedRecords {
    type Item = (&'a String, &'a Bucket);
    type IntoIter = btree_map::Iter<'a, String, Bucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

/// Partition a record stream into buckets in a single pass.
///
/// Stops at the first error from `records`. Rows read through
/// [`Records`](super::records::Records) already have their prefix checked;
/// a hand-built record without one is reported against `source` by stream
/// position.
pub fn group<I>(records: I, source: impl AsRef<Path>) -> Result<GroupedRecords>
where
    I: IntoIterator<Item = Result<PostalRecord>>,
{
    let mut grouped = GroupedRecords::default();
    for (idx, record) in records.into_iter().enumerate() {
        grouped.insert(record?).map_err(|kind| Error::Parse {
            path: source.as_ref().to_path_buf(),
            record: idx as u64 + 1,
            kind,
        })?;
    }
    debug!(
        buckets = grouped.len(),
        records = grouped.record_count(),
        "grouped"
    );
    Ok(grouped)
}
