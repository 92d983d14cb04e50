//! The list panel: owns the records, the form, and the edit observer.

use chrono::FixedOffset;

use crate::card::{CardView, EditObserver, EducationCard, LogEditObserver};
use crate::date::RecordDate;
use crate::form::RecordForm;
use crate::record::{EducationRecord, RecordId};

/// A seed record as text, parsed with the form's zone at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seed {
    pub name: String,
    pub from: String,
    pub to: String,
}

impl Seed {
    pub fn new(name: &str, from: &str, to: &str) -> Self {
        Self {
            name: name.to_owned(),
            from: from.to_owned(),
            to: to.to_owned(),
        }
    }

    pub fn to_record(&self, zone: &FixedOffset) -> EducationRecord {
        EducationRecord::new(
            self.name.clone(),
            RecordDate::parse(&self.from, zone),
            RecordDate::parse(&self.to, zone),
        )
    }
}

/// The five built-in entries the panel starts with.
pub fn default_seeds() -> Vec<Seed> {
    vec![
        Seed::new("School 1", "2020-01-01", "2020-05-01"),
        Seed::new("School 2", "2020-05-01", "2020-09-01"),
        Seed::new("School 3", "2020-09-01", "2021-01-01"),
        Seed::new("School 4", "2021-01-01", "2021-05-01"),
        Seed::new("School 5", "2021-05-01", "2021-09-01"),
    ]
}

/// Owns the insertion-ordered collection. Records are only ever appended.
pub struct EducationListPanel {
    records: Vec<EducationRecord>,
    form: RecordForm,
    observer: Box<dyn EditObserver>,
}

impl EducationListPanel {
    pub fn new(seeds: &[Seed], form: RecordForm, observer: Box<dyn EditObserver>) -> Self {
        let zone = form.zone();
        Self {
            records: seeds.iter().map(|s| s.to_record(&zone)).collect(),
            form,
            observer,
        }
    }

    /// Built-in seeds, the given form, and the logging observer.
    pub fn with_form(form: RecordForm) -> Self {
        Self::new(&default_seeds(), form, Box::new(LogEditObserver))
    }

    pub const fn form(&self) -> &RecordForm {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut RecordForm {
        &mut self.form
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[EducationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&EducationRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn add(&mut self, record: EducationRecord) {
        tracing::debug!(
            record_id = record.id().get(),
            len = self.records.len() + 1,
            "record appended"
        );
        self.records.push(record);
    }

    /// Save button: build a record from the draft and append it.
    pub fn save_draft(&mut self) -> RecordId {
        let record = self.form.save();
        let id = record.id();
        self.add(record);
        id
    }

    /// Reset button.
    pub fn reset_draft(&mut self) {
        self.form.reset();
    }

    /// A card was clicked. Notifies the observer; the collection is left
    /// alone. Returns `false` if no record has this id.
    pub fn request_edit(&self, id: RecordId) -> bool {
        let Some(record) = self.get(id) else {
            tracing::warn!(record_id = id.get(), "edit requested for unknown record");
            return false;
        };
        EducationCard::new(record).click(self.observer.as_ref());
        true
    }

    /// Cards in display order: most recently added first.
    pub fn cards(&self) -> Vec<EducationCard<'_>> {
        self.records.iter().rev().map(EducationCard::new).collect()
    }

    pub fn card_views(&self) -> Vec<CardView> {
        self.cards().iter().map(EducationCard::view).collect()
    }
}

impl Default for EducationListPanel {
    fn default() -> Self {
        Self::with_form(RecordForm::default())
    }
}

impl std::fmt::Debug for EducationListPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EducationListPanel")
            .field("records", &self.records)
            .field("form", &self.form)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use proptest::prelude::*;

    use super::*;
    use crate::form::FormDefaults;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl EditObserver for Recorder {
        fn notify(&self, record: &EducationRecord) {
            self.0.borrow_mut().push(record.school_name().to_owned());
        }
    }

    fn utc_form() -> RecordForm {
        RecordForm::new(FormDefaults::default(), FixedOffset::east_opt(0).unwrap())
    }

    fn panel_with(recorder: &Recorder) -> EducationListPanel {
        EducationListPanel::new(&default_seeds(), utc_form(), Box::new(recorder.clone()))
    }

    fn names(panel: &EducationListPanel) -> Vec<String> {
        panel
            .cards()
            .iter()
            .map(|c| c.title().to_owned())
            .collect()
    }

    #[test]
    fn starts_with_five_seeds() {
        let panel = EducationListPanel::with_form(utc_form());
        assert_eq!(panel.len(), 5);
        assert_eq!(
            names(&panel),
            ["School 5", "School 4", "School 3", "School 2", "School 1"]
        );
        assert_eq!(panel.cards()[0].date_range(), "(2021-05-01)-(2021-09-01)");
    }

    #[test]
    fn save_appends_and_renders_first() {
        let mut panel = EducationListPanel::with_form(utc_form());
        let form = panel.form_mut();
        form.set_name("School 6");
        form.set_from("2022-06-01");
        form.set_to("2022-08-01");
        let id = panel.save_draft();

        assert_eq!(panel.len(), 6);
        assert_eq!(panel.records().last().map(EducationRecord::id), Some(id));
        let cards = panel.cards();
        assert_eq!(cards[0].title(), "School 6");
        assert_eq!(cards[0].date_range(), "(2022-06-01)-(2022-08-01)");
        assert_eq!(cards[5].title(), "School 1");
    }

    #[test]
    fn reset_without_edits_adds_nothing() {
        let mut panel = EducationListPanel::with_form(utc_form());
        panel.reset_draft();
        assert_eq!(panel.len(), 5);
        assert_eq!(panel.form().name(), "");
        assert_eq!(panel.form().from_text(), "2022-01-01");
        assert_eq!(panel.form().to_text(), "2022-05-01");
    }

    #[test]
    fn duplicate_names_keep_distinct_keys() {
        let mut panel = EducationListPanel::with_form(utc_form());
        panel.form_mut().set_name("School 1");
        panel.save_draft();
        let keys: Vec<RecordId> = panel.cards().iter().map(EducationCard::key).collect();
        let mut unique = keys.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn edit_notifies_and_does_not_mutate() {
        let recorder = Recorder::default();
        let panel = panel_with(&recorder);
        let before = panel.records().to_vec();

        let target = panel.records()[2].id();
        assert!(panel.request_edit(target));

        assert_eq!(*recorder.0.borrow(), vec!["School 3".to_owned()]);
        assert_eq!(panel.records(), before.as_slice());
    }

    #[test]
    fn edit_of_unknown_id_is_ignored() {
        let recorder = Recorder::default();
        let panel = panel_with(&recorder);
        let stray = EducationRecord::new("Elsewhere", RecordDate::INVALID, RecordDate::INVALID);
        assert!(!panel.request_edit(stray.id()));
        assert!(recorder.0.borrow().is_empty());
    }

    proptest! {
        #[test]
        fn saves_append_exactly_one_each(names in prop::collection::vec(".{0,12}", 0..10)) {
            let mut panel = EducationListPanel::with_form(utc_form());
            let seeds = panel.records().to_vec();
            for (i, name) in names.iter().enumerate() {
                panel.form_mut().set_name(name.clone());
                panel.save_draft();
                prop_assert_eq!(panel.len(), seeds.len() + i + 1);
                prop_assert_eq!(&panel.records()[..seeds.len()], seeds.as_slice());
            }
        }

        #[test]
        fn cards_are_reverse_insertion_order(extra in 0usize..8) {
            let mut panel = EducationListPanel::with_form(utc_form());
            for i in 0..extra {
                panel.form_mut().set_name(format!("Extra {i}"));
                panel.save_draft();
            }
            let shown: Vec<RecordId> = panel.cards().iter().map(EducationCard::key).collect();
            let mut stored: Vec<RecordId> = panel.records().iter().map(EducationRecord::id).collect();
            stored.reverse();
            prop_assert_eq!(shown, stored);
        }

        #[test]
        fn edits_never_change_the_collection(picks in prop::collection::vec(0usize..5, 0..10)) {
            let panel = EducationListPanel::with_form(utc_form());
            let before = panel.records().to_vec();
            for pick in picks {
                panel.request_edit(before[pick].id());
            }
            prop_assert_eq!(panel.records(), before.as_slice());
        }
    }
}
