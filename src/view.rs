use serde::Serialize;

use crate::config::AnswerLabels;
use crate::data::aggregate::{
    bucket_disclosure_by_age, count_by, cross_tabulate, key_metrics, CrossTab, DisclosureBucket,
    KeyMetrics, LabelCounts,
};
use crate::data::filter::{filter, FilterCriteria};
use crate::data::model::{Field, SurveyTable};
use crate::data::stats::{summary_statistics, ColumnSummary, DEFAULT_SUMMARY_COLUMNS};

// ---------------------------------------------------------------------------
// ViewBundle – everything one dashboard pass displays
// ---------------------------------------------------------------------------

/// Derived views for one set of filter criteria.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewBundle {
    pub criteria: FilterCriteria,
    pub metrics: KeyMetrics,
    /// Gender → treatment answer → count.
    pub treatment_by_gender: CrossTab,
    pub work_interference: LabelCounts,
    pub discussion_consequence: LabelCounts,
    pub mental_vs_physical: LabelCounts,
    pub disclosure_by_age: Vec<DisclosureBucket>,
    pub statistics: Vec<ColumnSummary>,
}

/// Filter `table` with `criteria` and recompute every view from scratch.
pub fn render_view(table: &SurveyTable, criteria: &FilterCriteria, labels: &AnswerLabels) -> ViewBundle {
    let filtered = filter(table, criteria);
    log::debug!(
        "Rendering view for {} / ages {}-{}: {} of {} rows",
        criteria.country,
        criteria.ages.min(),
        criteria.ages.max(),
        filtered.len(),
        table.len()
    );

    ViewBundle {
        criteria: criteria.clone(),
        metrics: key_metrics(&filtered, labels),
        treatment_by_gender: cross_tabulate(&filtered, Field::Gender, Field::SoughtTreatment, labels),
        work_interference: count_by(&filtered, Field::WorkInterference),
        discussion_consequence: count_by(&filtered, Field::DiscussionConsequence),
        mental_vs_physical: count_by(&filtered, Field::MentalVsPhysical),
        disclosure_by_age: bucket_disclosure_by_age(&filtered, labels),
        statistics: summary_statistics(&filtered, &DEFAULT_SUMMARY_COLUMNS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{AgeRange, CountrySelector};
    use crate::data::model::SurveyRecord;

    #[test]
    fn empty_selection_still_renders() {
        let table = SurveyTable::from_records(vec![SurveyRecord {
            country: "Brasil".into(),
            age: 30,
            ..Default::default()
        }]);
        let criteria = FilterCriteria {
            country: CountrySelector::Country("Chile".into()),
            ages: AgeRange::spanning(&table),
        };

        let view = render_view(&table, &criteria, &AnswerLabels::default());
        assert_eq!(view.metrics.total_responses, 0);
        assert!(view.treatment_by_gender.is_empty());
        assert!(view.work_interference.is_empty());
        assert_eq!(view.disclosure_by_age.len(), 5);
        assert_eq!(view.statistics.len(), DEFAULT_SUMMARY_COLUMNS.len());
        assert_eq!(view.criteria, criteria);
    }

    #[test]
    fn bundle_serializes_to_json() {
        let table = SurveyTable::default();
        let view = render_view(&table, &FilterCriteria::unfiltered(&table), &AnswerLabels::default());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["metrics"]["total_responses"], 0);
        assert_eq!(json["criteria"]["country"], "AllCountries");
        assert_eq!(json["disclosure_by_age"][4]["bucket"]["start"], 60);
    }
}
