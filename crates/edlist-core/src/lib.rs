//! edlist core — headless state model for the education list page.
//!
//! The page is a small component tree: a [`RootView`] wraps one
//! [`EducationListPanel`], which owns a [`RecordForm`] and the
//! insertion-ordered records shown as [`EducationCard`]s, newest first.
//! Frontends drive it through the form's update operations and the panel's
//! save/reset/edit operations, then re-render from [`EducationListPanel::cards`].

pub mod card;
pub mod config;
pub mod date;
pub mod error;
pub mod form;
pub mod panel;
pub mod record;
pub mod view;

pub use card::{CardView, EditObserver, EducationCard, LogEditObserver};
pub use config::{EdlistConfig, ZoneSetting};
pub use date::{INVALID_DATE, RecordDate};
pub use error::ConfigError;
pub use form::{DateField, FormDefaults, RecordForm};
pub use panel::{EducationListPanel, Seed, default_seeds};
pub use record::{EducationRecord, RecordId};
pub use view::RootView;
