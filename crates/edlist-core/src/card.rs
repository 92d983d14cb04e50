//! Rendering of a single record and the edit-request seam.

use serde::Serialize;

use crate::record::{EducationRecord, RecordId};

/// Receives "edit requested" notifications from cards.
pub trait EditObserver {
    fn notify(&self, record: &EducationRecord);
}

/// Default observer: logs the school name and does nothing else.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogEditObserver;

impl EditObserver for LogEditObserver {
    fn notify(&self, record: &EducationRecord) {
        tracing::info!(
            record_id = record.id().get(),
            school_name = record.school_name(),
            "edit requested"
        );
    }
}

/// A read-only view of one record as a card.
#[derive(Clone, Copy, Debug)]
pub struct EducationCard<'a> {
    record: &'a EducationRecord,
}

impl<'a> EducationCard<'a> {
    pub const fn new(record: &'a EducationRecord) -> Self {
        Self { record }
    }

    pub const fn record(&self) -> &'a EducationRecord {
        self.record
    }

    pub const fn key(&self) -> RecordId {
        self.record.id()
    }

    pub fn title(&self) -> &'a str {
        self.record.school_name()
    }

    /// `(YYYY-MM-DD)-(YYYY-MM-DD)`, both dates read as UTC calendar dates.
    pub fn date_range(&self) -> String {
        format!(
            "({})-({})",
            self.record.from_date().utc_date_string(),
            self.record.to_date().utc_date_string()
        )
    }

    /// The card was clicked.
    pub fn click(&self, observer: &dyn EditObserver) {
        observer.notify(self.record);
    }

    pub fn view(&self) -> CardView {
        CardView {
            key: self.key(),
            school_name: self.title().to_owned(),
            from: self.record.from_date().utc_date_string(),
            to: self.record.to_date().utc_date_string(),
            range: self.date_range(),
        }
    }
}

/// Owned snapshot of a rendered card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub key: RecordId,
    pub school_name: String,
    pub from: String,
    pub to: String,
    pub range: String,
}
