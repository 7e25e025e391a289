use std::fmt;

use serde::Serialize;

use super::model::{SurveyRecord, SurveyTable};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Filter predicate: country + inclusive age window
// ---------------------------------------------------------------------------

/// Label of the "no country filter" option in the country selector.
pub const ALL_COUNTRIES_LABEL: &str = "Todos";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum CountrySelector {
    #[default]
    AllCountries,
    Country(String),
}

impl CountrySelector {
    pub fn matches(&self, country: &str) -> bool {
        match self {
            CountrySelector::AllCountries => true,
            CountrySelector::Country(selected) => selected == country,
        }
    }
}

impl fmt::Display for CountrySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountrySelector::AllCountries => f.write_str(ALL_COUNTRIES_LABEL),
            CountrySelector::Country(c) => f.write_str(c),
        }
    }
}

/// Inclusive age window. Only constructible with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeRange {
    min: u32,
    max: u32,
}

impl AgeRange {
    /// Inverted bounds are rejected rather than swapped.
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min > max {
            return Err(DashboardError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// The full age span of `table`; `0..=u32::MAX` when it is empty.
    pub fn spanning(table: &SurveyTable) -> Self {
        let (min, max) = table.age_bounds().unwrap_or((0, u32::MAX));
        Self { min, max }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, age: u32) -> bool {
        (self.min..=self.max).contains(&age)
    }
}

/// The user's current narrowing of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub country: CountrySelector,
    pub ages: AgeRange,
}

impl FilterCriteria {
    /// All countries, full age span.
    pub fn unfiltered(table: &SurveyTable) -> Self {
        Self {
            country: CountrySelector::AllCountries,
            ages: AgeRange::spanning(table),
        }
    }

    pub fn matches(&self, record: &SurveyRecord) -> bool {
        self.ages.contains(record.age) && self.country.matches(&record.country)
    }
}

/// Return a new table holding the rows of `table` that pass `criteria`.
///
/// Row order is preserved and the source is left untouched. An empty
/// result is a valid outcome.
pub fn filter(table: &SurveyTable, criteria: &FilterCriteria) -> SurveyTable {
    let records = table
        .records()
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect();
    SurveyTable::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, age: u32) -> SurveyRecord {
        SurveyRecord {
            country: country.to_string(),
            age,
            ..Default::default()
        }
    }

    fn sample() -> SurveyTable {
        SurveyTable::from_records(vec![
            record("USA", 25),
            record("USA", 40),
            record("Brazil", 22),
            record("Brazil", 55),
            record("Brazil", 30),
        ])
    }

    #[test]
    fn country_and_age_window() {
        let criteria = FilterCriteria {
            country: CountrySelector::Country("Brazil".into()),
            ages: AgeRange::new(20, 35).unwrap(),
        };
        let out = filter(&sample(), &criteria);
        assert_eq!(out.records(), [record("Brazil", 22), record("Brazil", 30)]);
    }

    #[test]
    fn all_countries_bounds_are_inclusive() {
        let criteria = FilterCriteria {
            country: CountrySelector::AllCountries,
            ages: AgeRange::new(25, 40).unwrap(),
        };
        let out = filter(&sample(), &criteria);
        let ages: Vec<u32> = out.records().iter().map(|r| r.age).collect();
        assert_eq!(ages, [25, 40, 30]);
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(matches!(
            AgeRange::new(50, 20),
            Err(DashboardError::InvalidRange { min: 50, max: 20 })
        ));
        assert!(AgeRange::new(33, 33).is_ok());
    }

    #[test]
    fn unknown_country_gives_empty_table() {
        let criteria = FilterCriteria {
            country: CountrySelector::Country("Atlantis".into()),
            ages: AgeRange::spanning(&sample()),
        };
        let out = filter(&sample(), &criteria);
        assert!(out.is_empty());
        assert_eq!(out.age_bounds(), None);
    }

    #[test]
    fn unfiltered_keeps_everything() {
        let table = sample();
        let out = filter(&table, &FilterCriteria::unfiltered(&table));
        assert_eq!(out, table);
    }

    #[test]
    fn country_match_is_exact() {
        assert!(!CountrySelector::Country("brazil".into()).matches("Brazil"));
        assert_eq!(CountrySelector::AllCountries.to_string(), "Todos");
    }
}
