//! Workplace mental-health survey pipeline.
//!
//! Loads the survey once, narrows it by country and age, and derives the
//! counts, cross-tabulations and descriptive statistics a dashboard shows.
//! [`view::render_view`] bundles one full pass for any front-end.

pub mod config;
pub mod data;
pub mod error;
pub mod view;

pub use config::{AnswerLabels, DashboardConfig};
pub use data::filter::{filter, AgeRange, CountrySelector, FilterCriteria};
pub use data::loader::DatasetSource;
pub use data::model::{Field, SurveyRecord, SurveyTable};
pub use error::{DashboardError, Result};
pub use view::{render_view, ViewBundle};
