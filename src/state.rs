use std::path::PathBuf;
use std::sync::Arc;

use survey_dash::{
    render_view, AgeRange, AnswerLabels, CountrySelector, DashboardConfig, DatasetSource,
    FilterCriteria, Result, SurveyTable, ViewBundle,
};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Where the survey comes from; read at most once.
    pub source: DatasetSource,

    /// Shared, read-only survey (None until a load succeeds).
    pub dataset: Option<Arc<SurveyTable>>,

    pub labels: AnswerLabels,

    /// Current country selection.
    pub country: CountrySelector,

    /// Current slider positions. Kept with `age_min <= age_max`.
    pub age_min: u32,
    pub age_max: u32,

    /// Derived views for the current selection (cached until it changes).
    pub view: Option<ViewBundle>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            source: DatasetSource::new(config.dataset_path),
            dataset: None,
            labels: config.labels,
            country: CountrySelector::AllCountries,
            age_min: 0,
            age_max: 0,
            view: None,
            status_message: None,
        }
    }

    /// Read the configured source, reporting failures in the status line.
    pub fn load(&mut self) {
        match self.source.load() {
            Ok(table) => self.set_dataset(table),
            Err(e) => {
                log::error!("Failed to load survey: {e}");
                self.status_message = Some(format!("Erro: {e}"));
            }
        }
    }

    /// Point at a user-chosen file. Ignored once a survey is loaded.
    pub fn open_path(&mut self, path: PathBuf) {
        if self.dataset.is_some() {
            log::warn!("Survey already loaded, ignoring {}", path.display());
            return;
        }
        self.source = DatasetSource::new(path);
        self.load();
    }

    /// File name of the current source, for the top bar.
    pub fn source_name(&self) -> String {
        let path = self.source.path();
        path.file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }

    /// Ingest the loaded survey and reset filters to the full range.
    pub fn set_dataset(&mut self, dataset: Arc<SurveyTable>) {
        let (min, max) = dataset.age_bounds().unwrap_or((0, 0));
        self.age_min = min;
        self.age_max = max;
        self.country = CountrySelector::AllCountries;
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh();
    }

    pub fn criteria(&self) -> Result<FilterCriteria> {
        Ok(FilterCriteria {
            country: self.country.clone(),
            ages: AgeRange::new(self.age_min, self.age_max)?,
        })
    }

    /// Recompute every view after a filter change.
    pub fn refresh(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        match self.criteria() {
            Ok(criteria) => {
                self.view = Some(render_view(ds, &criteria, &self.labels));
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("Rejected filter: {e}");
                self.status_message = Some(format!("Erro: {e}"));
            }
        }
    }

    pub fn set_country(&mut self, country: CountrySelector) {
        if self.country != country {
            self.country = country;
            self.refresh();
        }
    }

    /// Move the lower bound, dragging the upper one along if needed.
    pub fn set_age_min(&mut self, age: u32) {
        self.age_min = age;
        self.age_max = self.age_max.max(age);
        self.refresh();
    }

    /// Move the upper bound, dragging the lower one along if needed.
    pub fn set_age_max(&mut self, age: u32) {
        self.age_max = age;
        self.age_min = self.age_min.min(age);
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_dash::SurveyRecord;

    fn state_with(rows: &[(&str, u32)]) -> AppState {
        let records = rows
            .iter()
            .map(|&(country, age)| SurveyRecord {
                country: country.to_string(),
                age,
                ..Default::default()
            })
            .collect();
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(Arc::new(SurveyTable::from_records(records)));
        state
    }

    fn total(state: &AppState) -> usize {
        state.view.as_ref().map_or(0, |v| v.metrics.total_responses)
    }

    #[test]
    fn dataset_resets_to_full_range() {
        let state = state_with(&[("USA", 25), ("Brazil", 61)]);
        assert_eq!((state.age_min, state.age_max), (25, 61));
        assert_eq!(total(&state), 2);
    }

    #[test]
    fn filters_recompute_the_view() {
        let mut state = state_with(&[
            ("USA", 25),
            ("USA", 40),
            ("Brazil", 22),
            ("Brazil", 55),
            ("Brazil", 30),
        ]);
        state.set_country(CountrySelector::Country("Brazil".into()));
        state.set_age_min(20);
        state.set_age_max(35);
        assert_eq!(total(&state), 2);
    }

    #[test]
    fn sliders_never_invert() {
        let mut state = state_with(&[("USA", 20), ("USA", 60)]);
        state.set_age_max(30);
        state.set_age_min(45);
        assert_eq!((state.age_min, state.age_max), (45, 45));
        state.set_age_max(25);
        assert_eq!((state.age_min, state.age_max), (25, 25));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(DashboardConfig {
            dataset_path: dir.path().join("absent.csv"),
            ..Default::default()
        });
        state.load();
        assert!(state.dataset.is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn open_path_switches_source_until_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(DashboardConfig::default());
        state.open_path(dir.path().join("outro.csv"));
        assert_eq!(state.source_name(), "outro.csv");
        assert!(state.status_message.is_some());

        let mut loaded = state_with(&[("USA", 30)]);
        let before = loaded.source_name();
        loaded.open_path(dir.path().join("outro.csv"));
        assert_eq!(loaded.source_name(), before);
    }
}
