use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{Field, FieldKind, SurveyTable};

/// Columns shown in the descriptive-statistics table, in display order.
pub const DEFAULT_SUMMARY_COLUMNS: [Field; 6] = [
    Field::Age,
    Field::Gender,
    Field::Country,
    Field::SoughtTreatment,
    Field::FamilyHistory,
    Field::WorkInterference,
];

// ---------------------------------------------------------------------------
// Summary types
// ---------------------------------------------------------------------------

/// `count, mean, std, min, 25%, 50%, 75%, max` of a numeric column.
///
/// Values that are undefined for the row count (everything on an empty
/// column, `std` on a single row) are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// `count, unique, top, freq` of a categorical column. Empty cells are
/// treated as missing and excluded from all four.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoricalSummary {
    pub count: usize,
    pub distinct: usize,
    pub mode: Option<String>,
    pub frequency: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Summary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub field: Field,
    pub summary: Summary,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Describe each of `columns` over `table`, in the order given.
pub fn summary_statistics(table: &SurveyTable, columns: &[Field]) -> Vec<ColumnSummary> {
    columns
        .iter()
        .map(|&field| {
            let summary = match field.kind() {
                FieldKind::Numeric => Summary::Numeric(describe_numeric(
                    table.records().iter().filter_map(|r| r.number(field)).collect(),
                )),
                FieldKind::Categorical => Summary::Categorical(describe_categorical(
                    table.records().iter().map(|r| r.label(field)),
                )),
            };
            ColumnSummary { field, summary }
        })
        .collect()
}

fn describe_numeric(mut values: Vec<f64>) -> NumericSummary {
    values.sort_by(f64::total_cmp);
    let n = values.len();
    let mean = (n > 0).then(|| values.iter().sum::<f64>() / n as f64);
    let std = mean.filter(|_| n > 1).map(|m| {
        let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    });

    NumericSummary {
        count: n,
        mean,
        std,
        min: values.first().copied(),
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values.last().copied(),
    }
}

/// Linear interpolation between closest ranks over sorted `values`.
fn quantile(values: &[f64], q: f64) -> Option<f64> {
    let last = values.len().checked_sub(1)?;
    let pos = q * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(values[lo] + (values[hi] - values[lo]) * frac)
}

fn describe_categorical<I, S>(labels: I) -> CategoricalSummary
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    let mut freq: BTreeMap<String, usize> = BTreeMap::new();
    for label in labels {
        let label = label.as_ref();
        if label.is_empty() {
            continue;
        }
        *freq.entry(label.to_string()).or_insert(0) += 1;
    }

    // max_by_key keeps the last maximum, so walk in reverse for the
    // lexicographically smallest label on ties.
    let top = freq.iter().rev().max_by_key(|(_, n)| **n);

    CategoricalSummary {
        count: freq.values().sum(),
        distinct: freq.len(),
        mode: top.map(|(label, _)| label.clone()),
        frequency: top.map_or(0, |(_, n)| *n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SurveyRecord;

    fn aged(ages: &[u32]) -> SurveyTable {
        SurveyTable::from_records(
            ages.iter()
                .map(|&age| SurveyRecord {
                    age,
                    ..Default::default()
                })
                .collect(),
        )
    }

    fn numeric(table: &SurveyTable) -> NumericSummary {
        match &summary_statistics(table, &[Field::Age])[0].summary {
            Summary::Numeric(s) => s.clone(),
            other => panic!("expected numeric summary, got {other:?}"),
        }
    }

    fn close(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn numeric_matches_describe_semantics() {
        let s = numeric(&aged(&[22, 25, 30, 40, 55]));
        assert_eq!(s.count, 5);
        assert!(close(s.mean, 34.4));
        // sample std: sqrt(717.2 / 4)
        assert!(close(s.std, (717.2f64 / 4.0).sqrt()));
        assert!(close(s.min, 22.0));
        assert!(close(s.q25, 25.0));
        assert!(close(s.median, 30.0));
        assert!(close(s.q75, 40.0));
        assert!(close(s.max, 55.0));
    }

    #[test]
    fn quartiles_interpolate() {
        let s = numeric(&aged(&[20, 30, 40, 50]));
        assert!(close(s.q25, 27.5));
        assert!(close(s.median, 35.0));
        assert!(close(s.q75, 42.5));
    }

    #[test]
    fn empty_and_single_row_are_total() {
        let empty = numeric(&SurveyTable::default());
        assert_eq!(empty.count, 0);
        assert_eq!(empty.mean, None);
        assert_eq!(empty.max, None);

        let one = numeric(&aged(&[31]));
        assert_eq!(one.count, 1);
        assert!(close(one.mean, 31.0));
        assert_eq!(one.std, None);
        assert!(close(one.median, 31.0));
    }

    #[test]
    fn categorical_mode_breaks_ties_by_label() {
        let genders = ["Masculino", "Feminino", "Masculino", "Feminino", "Outro", ""];
        let table = SurveyTable::from_records(
            genders
                .iter()
                .map(|g| SurveyRecord {
                    gender: g.to_string(),
                    ..Default::default()
                })
                .collect(),
        );

        let summaries = summary_statistics(&table, &[Field::Gender]);
        let Summary::Categorical(s) = &summaries[0].summary else {
            panic!("expected categorical summary");
        };
        assert_eq!(s.count, 5);
        assert_eq!(s.distinct, 3);
        assert_eq!(s.mode.as_deref(), Some("Feminino"));
        assert_eq!(s.frequency, 2);
    }

    #[test]
    fn default_columns_keep_order() {
        let summaries = summary_statistics(&SurveyTable::default(), &DEFAULT_SUMMARY_COLUMNS);
        let fields: Vec<Field> = summaries.iter().map(|s| s.field).collect();
        assert_eq!(fields, DEFAULT_SUMMARY_COLUMNS);
        assert!(matches!(
            &summaries[1].summary,
            Summary::Categorical(CategoricalSummary { count: 0, mode: None, .. })
        ));
    }
}
