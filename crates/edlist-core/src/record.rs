//! The education record entity.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::date::RecordDate;

static NEXT_RECORD_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a record, assigned once at construction.
///
/// Two records with the same school name and dates still have different ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    fn next() -> Self {
        Self(NEXT_RECORD_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One education entry. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EducationRecord {
    id: RecordId,
    school_name: String,
    from_date: RecordDate,
    to_date: RecordDate,
}

impl EducationRecord {
    pub fn new(school_name: impl Into<String>, from_date: RecordDate, to_date: RecordDate) -> Self {
        Self {
            id: RecordId::next(),
            school_name: school_name.into(),
            from_date,
            to_date,
        }
    }

    pub const fn id(&self) -> RecordId {
        self.id
    }

    pub fn school_name(&self) -> &str {
        &self.school_name
    }

    pub const fn from_date(&self) -> RecordDate {
        self.from_date
    }

    pub const fn to_date(&self) -> RecordDate {
        self.to_date
    }
}
