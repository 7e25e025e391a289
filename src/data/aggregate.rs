use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use super::model::{Field, SurveyTable};
use crate::config::AnswerLabels;

// ---------------------------------------------------------------------------
// Grouped counts
// ---------------------------------------------------------------------------

/// label → number of rows carrying it.
pub type LabelCounts = BTreeMap<String, usize>;

/// row label → column label → count.
pub type CrossTab = BTreeMap<String, BTreeMap<String, usize>>;

/// Count rows per distinct value of `field`. Absent labels are omitted.
pub fn count_by(table: &SurveyTable, field: Field) -> LabelCounts {
    let mut counts = LabelCounts::new();
    for record in table.records() {
        *counts.entry(record.label(field).into_owned()).or_insert(0) += 1;
    }
    counts
}

/// Like [`count_by`] but the yes/no pair is always present, zero if unseen.
pub fn count_binary(table: &SurveyTable, field: Field, labels: &AnswerLabels) -> LabelCounts {
    let mut counts = count_by(table, field);
    for label in labels.pair() {
        counts.entry(label.to_string()).or_insert(0);
    }
    counts
}

/// Entries by descending count; equal counts stay in label order.
pub fn ranked(counts: &LabelCounts) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

/// Two-way frequency table of `row_field` against `column_field`.
///
/// Every observed row value carries every observed column value plus both
/// answer labels, so grouped bars line up across categories.
pub fn cross_tabulate(
    table: &SurveyTable,
    row_field: Field,
    column_field: Field,
    labels: &AnswerLabels,
) -> CrossTab {
    let mut columns: BTreeSet<String> = labels.pair().iter().map(|l| l.to_string()).collect();
    for record in table.records() {
        columns.insert(record.label(column_field).into_owned());
    }

    let mut tab = CrossTab::new();
    for record in table.records() {
        let row = tab
            .entry(record.label(row_field).into_owned())
            .or_insert_with(|| columns.iter().map(|c| (c.clone(), 0)).collect());
        if let Some(n) = row.get_mut(&*record.label(column_field)) {
            *n += 1;
        }
    }
    tab
}

// ---------------------------------------------------------------------------
// Age buckets
// ---------------------------------------------------------------------------

const BUCKET_START: u32 = 20;
const BUCKET_WIDTH: u32 = 10;
const BUCKET_END: u32 = 70;

/// Half-open age interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct AgeBucket {
    pub start: u32,
    pub end: u32,
}

impl AgeBucket {
    /// `[20,30) [30,40) … [60,70)`, ascending.
    pub fn all() -> impl Iterator<Item = AgeBucket> {
        (BUCKET_START..BUCKET_END)
            .step_by(BUCKET_WIDTH as usize)
            .map(|start| AgeBucket {
                start,
                end: start + BUCKET_WIDTH,
            })
    }

    pub fn for_age(age: u32) -> Option<AgeBucket> {
        if !(BUCKET_START..BUCKET_END).contains(&age) {
            return None;
        }
        let start = BUCKET_START + (age - BUCKET_START) / BUCKET_WIDTH * BUCKET_WIDTH;
        Some(AgeBucket {
            start,
            end: start + BUCKET_WIDTH,
        })
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end - 1)
    }
}

/// Affirmative answers about talking to coworkers and supervisors in one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisclosureBucket {
    pub bucket: AgeBucket,
    pub respondents: usize,
    pub coworkers_yes: usize,
    pub supervisor_yes: usize,
}

/// One entry per age bucket, ascending, empty buckets included.
///
/// Rows outside every bucket are skipped here only.
pub fn bucket_disclosure_by_age(table: &SurveyTable, labels: &AnswerLabels) -> Vec<DisclosureBucket> {
    let mut buckets: Vec<DisclosureBucket> = AgeBucket::all()
        .map(|bucket| DisclosureBucket {
            bucket,
            respondents: 0,
            coworkers_yes: 0,
            supervisor_yes: 0,
        })
        .collect();

    for record in table.records() {
        let Some(bucket) = AgeBucket::for_age(record.age) else {
            continue;
        };
        let Some(entry) = buckets.iter_mut().find(|b| b.bucket == bucket) else {
            continue;
        };
        entry.respondents += 1;
        if labels.is_affirmative(&record.talks_to_coworkers) {
            entry.coworkers_yes += 1;
        }
        if labels.is_affirmative(&record.talks_to_supervisor) {
            entry.supervisor_yes += 1;
        }
    }
    buckets
}

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct KeyMetrics {
    pub total_responses: usize,
    pub treatment_yes: usize,
    pub family_history_yes: usize,
    pub remote_work_yes: usize,
}

pub fn key_metrics(table: &SurveyTable, labels: &AnswerLabels) -> KeyMetrics {
    let affirmative = |field: Field| {
        count_binary(table, field, labels)
            .get(labels.affirmative.as_str())
            .copied()
            .unwrap_or(0)
    };
    KeyMetrics {
        total_responses: table.len(),
        treatment_yes: affirmative(Field::SoughtTreatment),
        family_history_yes: affirmative(Field::FamilyHistory),
        remote_work_yes: affirmative(Field::RemoteWork),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SurveyRecord;

    fn respondent(age: u32, gender: &str, treatment: &str) -> SurveyRecord {
        SurveyRecord {
            country: "Brasil".into(),
            age,
            gender: gender.into(),
            sought_treatment: treatment.into(),
            ..Default::default()
        }
    }

    #[test]
    fn count_by_omits_absent_labels() {
        let mut a = respondent(30, "F", "Sim");
        a.work_interference = "Often".into();
        let mut b = respondent(31, "M", "Não");
        b.work_interference = "Often".into();
        let mut c = respondent(32, "M", "Não");
        c.work_interference = "Never".into();
        let table = SurveyTable::from_records(vec![a, b, c]);

        let counts = count_by(&table, Field::WorkInterference);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["Often"], 2);
        assert_eq!(counts["Never"], 1);
        assert!(!counts.contains_key("Sometimes"));
    }

    #[test]
    fn count_by_empty_table_is_empty() {
        assert!(count_by(&SurveyTable::default(), Field::WorkInterference).is_empty());
    }

    #[test]
    fn count_binary_zero_fills_pair() {
        let table = SurveyTable::from_records(vec![respondent(30, "F", "Sim")]);
        let counts = count_binary(&table, Field::SoughtTreatment, &AnswerLabels::default());
        assert_eq!(counts["Sim"], 1);
        assert_eq!(counts["Não"], 0);
    }

    #[test]
    fn age_65_falls_in_the_sixties_bucket() {
        assert_eq!(AgeBucket::for_age(65), Some(AgeBucket { start: 60, end: 70 }));
        assert_eq!(AgeBucket::for_age(70), None);

        let table = SurveyTable::from_records(vec![respondent(65, "F", "Sim")]);
        let respondents: Vec<usize> = bucket_disclosure_by_age(&table, &AnswerLabels::default())
            .iter()
            .map(|b| b.respondents)
            .collect();
        assert_eq!(respondents, [0, 0, 0, 0, 1]);
    }

    #[test]
    fn ranked_orders_by_count_then_label() {
        let counts: LabelCounts = [("b", 2), ("a", 2), ("c", 5)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert_eq!(ranked(&counts), [("c", 5), ("a", 2), ("b", 2)]);
    }

    #[test]
    fn cross_tab_fills_missing_combinations() {
        let table = SurveyTable::from_records(vec![
            respondent(30, "Feminino", "Sim"),
            respondent(31, "Feminino", "Sim"),
            respondent(32, "Masculino", "Não"),
            respondent(33, "Outro", "Talvez"),
        ]);
        let tab = cross_tabulate(
            &table,
            Field::Gender,
            Field::SoughtTreatment,
            &AnswerLabels::default(),
        );

        assert_eq!(tab.len(), 3);
        for row in tab.values() {
            assert!(row.contains_key("Sim"));
            assert!(row.contains_key("Não"));
            assert!(row.contains_key("Talvez"));
        }
        assert_eq!(tab["Feminino"]["Sim"], 2);
        assert_eq!(tab["Feminino"]["Não"], 0);
        assert_eq!(tab["Masculino"]["Não"], 1);
        assert_eq!(tab["Outro"]["Talvez"], 1);
    }

    #[test]
    fn buckets_are_fixed_and_ascending() {
        let starts: Vec<u32> = AgeBucket::all().map(|b| b.start).collect();
        assert_eq!(starts, [20, 30, 40, 50, 60]);
        assert_eq!(AgeBucket::for_age(65), Some(AgeBucket { start: 60, end: 70 }));
        assert_eq!(AgeBucket::for_age(30), Some(AgeBucket { start: 30, end: 40 }));
        assert_eq!(AgeBucket::for_age(19), None);
        assert_eq!(AgeBucket::for_age(70), None);
        assert_eq!(AgeBucket { start: 20, end: 30 }.to_string(), "20-29");
    }

    #[test]
    fn disclosure_counts_are_independent() {
        let mut a = respondent(25, "F", "Sim");
        a.talks_to_coworkers = "Sim".into();
        a.talks_to_supervisor = "Não".into();
        let mut b = respondent(27, "M", "Sim");
        b.talks_to_coworkers = "Sim".into();
        b.talks_to_supervisor = "Sim".into();
        let mut c = respondent(75, "M", "Sim");
        c.talks_to_coworkers = "Sim".into();
        c.talks_to_supervisor = "Sim".into();
        let table = SurveyTable::from_records(vec![a, b, c]);

        let view = bucket_disclosure_by_age(&table, &AnswerLabels::default());
        assert_eq!(view.len(), 5);
        assert_eq!(view[0].respondents, 2);
        assert_eq!(view[0].coworkers_yes, 2);
        assert_eq!(view[0].supervisor_yes, 1);
        assert!(view[1..].iter().all(|b| b.respondents == 0));
        assert!(view.windows(2).all(|w| w[0].bucket < w[1].bucket));
    }

    #[test]
    fn metrics_use_exact_labels() {
        let mut a = respondent(30, "F", "Sim");
        a.family_history = "sim".into();
        a.remote_work = "Sim".into();
        let b = respondent(40, "M", "Sim ");
        let table = SurveyTable::from_records(vec![a, b]);

        let m = key_metrics(&table, &AnswerLabels::default());
        assert_eq!(
            m,
            KeyMetrics {
                total_responses: 2,
                treatment_yes: 1,
                family_history_yes: 0,
                remote_work_yes: 1,
            }
        );
    }
}
