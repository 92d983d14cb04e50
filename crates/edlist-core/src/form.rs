//! Draft input state for a new record.

use chrono::FixedOffset;

use crate::date::RecordDate;
use crate::record::EducationRecord;

pub const DEFAULT_NAME: &str = "";
pub const DEFAULT_FROM: &str = "2022-01-01";
pub const DEFAULT_TO: &str = "2022-05-01";

/// Which date field an update targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateField {
    From,
    To,
}

/// The values Reset restores.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormDefaults {
    pub name: String,
    pub from: String,
    pub to: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            from: DEFAULT_FROM.to_owned(),
            to: DEFAULT_TO.to_owned(),
        }
    }
}

/// Draft state behind the name and date inputs.
///
/// Date drafts are kept as text. Every date update goes through
/// parse-then-reformat in the form's local zone, so the stored text is always
/// canonical `YYYY-MM-DD` (or `NaN-NaN-NaN`).
#[derive(Clone, Debug)]
pub struct RecordForm {
    name: String,
    from_text: String,
    to_text: String,
    defaults: FormDefaults,
    zone: FixedOffset,
}

impl RecordForm {
    pub fn new(defaults: FormDefaults, zone: FixedOffset) -> Self {
        Self {
            name: defaults.name.clone(),
            from_text: defaults.from.clone(),
            to_text: defaults.to.clone(),
            defaults,
            zone,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn from_text(&self) -> &str {
        &self.from_text
    }

    pub fn to_text(&self) -> &str {
        &self.to_text
    }

    pub fn date_text(&self, field: DateField) -> &str {
        match field {
            DateField::From => &self.from_text,
            DateField::To => &self.to_text,
        }
    }

    pub const fn zone(&self) -> FixedOffset {
        self.zone
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        tracing::debug!(name = %self.name, "draft name updated");
    }

    pub fn set_from(&mut self, raw: &str) {
        self.set_date(DateField::From, raw);
    }

    pub fn set_to(&mut self, raw: &str) {
        self.set_date(DateField::To, raw);
    }

    /// Parse `raw` leniently and store its canonical calendar form.
    pub fn set_date(&mut self, field: DateField, raw: &str) {
        let canonical = RecordDate::parse(raw, &self.zone).zoned_date_string(&self.zone);
        tracing::debug!(?field, raw, canonical = %canonical, "draft date updated");
        match field {
            DateField::From => self.from_text = canonical,
            DateField::To => self.to_text = canonical,
        }
    }

    /// Build a record from the current draft. Nothing is validated and the
    /// draft is left as it is.
    pub fn save(&self) -> EducationRecord {
        let record = EducationRecord::new(
            self.name.clone(),
            RecordDate::parse(&self.from_text, &self.zone),
            RecordDate::parse(&self.to_text, &self.zone),
        );
        tracing::info!(
            record_id = record.id().get(),
            school_name = record.school_name(),
            "draft saved"
        );
        record
    }

    pub fn reset(&mut self) {
        self.name.clone_from(&self.defaults.name);
        self.from_text.clone_from(&self.defaults.from);
        self.to_text.clone_from(&self.defaults.to);
        tracing::info!("draft reset");
    }
}

impl Default for RecordForm {
    fn default() -> Self {
        Self::new(FormDefaults::default(), crate::date::host_offset())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn utc_form() -> RecordForm {
        RecordForm::new(FormDefaults::default(), FixedOffset::east_opt(0).unwrap())
    }

    fn assert_defaults(form: &RecordForm) {
        assert_eq!(form.name(), "");
        assert_eq!(form.from_text(), "2022-01-01");
        assert_eq!(form.to_text(), "2022-05-01");
    }

    #[test]
    fn starts_at_defaults() {
        assert_defaults(&utc_form());
    }

    #[test]
    fn name_is_stored_verbatim() {
        let mut form = utc_form();
        form.set_name("  Springfield Elementary ");
        assert_eq!(form.name(), "  Springfield Elementary ");
    }

    #[test]
    fn date_updates_are_reformatted() {
        let mut form = utc_form();
        form.set_from("2022-6-1");
        form.set_to("08/01/2022");
        assert_eq!(form.from_text(), "2022-06-01");
        assert_eq!(form.to_text(), "2022-08-01");
    }

    #[test]
    fn unparseable_date_stores_nan() {
        let mut form = utc_form();
        form.set_to("next summer");
        assert_eq!(form.date_text(DateField::To), "NaN-NaN-NaN");
    }

    #[test]
    fn save_accepts_anything() {
        let mut form = utc_form();
        form.set_from("2023-01-01");
        form.set_to("oops");
        let record = form.save();
        assert_eq!(record.school_name(), "");
        assert_eq!(record.from_date().utc_date_string(), "2023-01-01");
        assert!(!record.to_date().is_valid());
    }

    #[test]
    fn save_leaves_draft_untouched() {
        let mut form = utc_form();
        form.set_name("School 6");
        let _ = form.save();
        assert_eq!(form.name(), "School 6");
    }

    #[test]
    fn reset_restores_custom_defaults() {
        let defaults = FormDefaults {
            name: "Unnamed".to_owned(),
            from: "2024-09-01".to_owned(),
            to: "2025-06-30".to_owned(),
        };
        let mut form = RecordForm::new(defaults.clone(), FixedOffset::east_opt(0).unwrap());
        form.set_name("x");
        form.set_from("2000-01-01");
        form.reset();
        assert_eq!(form.name(), defaults.name);
        assert_eq!(form.from_text(), defaults.from);
        assert_eq!(form.to_text(), defaults.to);
    }

    #[test]
    fn negative_zone_shifts_the_round_trip() {
        let mut form =
            RecordForm::new(FormDefaults::default(), FixedOffset::west_opt(5 * 3600).unwrap());
        form.set_from("2022-06-01");
        assert_eq!(form.from_text(), "2022-05-31");
    }

    proptest! {
        #[test]
        fn reset_is_idempotent(
            name in ".{0,20}",
            from in "[0-9/-]{0,12}",
            resets in 1usize..5,
        ) {
            let mut form = utc_form();
            form.set_name(name);
            form.set_from(&from);
            for _ in 0..resets {
                form.reset();
                assert_defaults(&form);
            }
        }

        #[test]
        fn iso_dates_are_a_fixed_point(
            y in 1000i32..=9999,
            m in 1u32..=12,
            d in 1u32..=28,
            east_hours in 0i32..=14,
        ) {
            let input = format!("{y:04}-{m:02}-{d:02}");
            let zone = FixedOffset::east_opt(east_hours * 3600).unwrap();
            let mut form = RecordForm::new(FormDefaults::default(), zone);
            form.set_from(&input);
            form.set_to(&input);
            prop_assert_eq!(form.from_text(), input.as_str());
            prop_assert_eq!(form.to_text(), input.as_str());
        }
    }
}
