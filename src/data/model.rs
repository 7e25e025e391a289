use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Field – one survey column
// ---------------------------------------------------------------------------

/// How a column is summarised in the statistics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Categorical,
}

/// The survey columns the dashboard understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    Country,
    Age,
    Gender,
    SoughtTreatment,
    FamilyHistory,
    RemoteWork,
    WorkInterference,
    DiscussionConsequence,
    MentalVsPhysical,
    TalksToCoworkers,
    TalksToSupervisor,
}

impl Field {
    pub const COUNT: usize = 11;

    /// Every column, in declaration order.
    pub const ALL: [Field; Field::COUNT] = [
        Field::Country,
        Field::Age,
        Field::Gender,
        Field::SoughtTreatment,
        Field::FamilyHistory,
        Field::RemoteWork,
        Field::WorkInterference,
        Field::DiscussionConsequence,
        Field::MentalVsPhysical,
        Field::TalksToCoworkers,
        Field::TalksToSupervisor,
    ];

    /// Position of the field in [`Field::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column header in the source file.
    pub fn header(self) -> &'static str {
        match self {
            Field::Country => "Pais",
            Field::Age => "Idade",
            Field::Gender => "Genero",
            Field::SoughtTreatment => "Tratamento",
            Field::FamilyHistory => "Historico_familiar",
            Field::RemoteWork => "Trabalho_remoto",
            Field::WorkInterference => "Interfere_no_trabalho",
            Field::DiscussionConsequence => "Consequencia_saude_mental",
            Field::MentalVsPhysical => "Mental_vs_fisica",
            Field::TalksToCoworkers => "Colegas_de_trabalho",
            Field::TalksToSupervisor => "Supervisor",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Age => FieldKind::Numeric,
            _ => FieldKind::Categorical,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// SurveyRecord – one row of the survey
// ---------------------------------------------------------------------------

/// A single survey response. Categorical answers are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub country: String,
    pub age: u32,
    pub gender: String,
    pub sought_treatment: String,
    pub family_history: String,
    pub remote_work: String,
    pub work_interference: String,
    pub discussion_consequence: String,
    pub mental_vs_physical: String,
    pub talks_to_coworkers: String,
    pub talks_to_supervisor: String,
}

impl SurveyRecord {
    /// The cell for `field` as text. Age is rendered in decimal.
    pub fn label(&self, field: Field) -> Cow<'_, str> {
        let text = match field {
            Field::Age => return Cow::Owned(self.age.to_string()),
            Field::Country => &self.country,
            Field::Gender => &self.gender,
            Field::SoughtTreatment => &self.sought_treatment,
            Field::FamilyHistory => &self.family_history,
            Field::RemoteWork => &self.remote_work,
            Field::WorkInterference => &self.work_interference,
            Field::DiscussionConsequence => &self.discussion_consequence,
            Field::MentalVsPhysical => &self.mental_vs_physical,
            Field::TalksToCoworkers => &self.talks_to_coworkers,
            Field::TalksToSupervisor => &self.talks_to_supervisor,
        };
        Cow::Borrowed(text.as_str())
    }

    /// Numeric value of `field`, if it is a numeric column.
    pub fn number(&self, field: Field) -> Option<f64> {
        match field {
            Field::Age => Some(f64::from(self.age)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// SurveyTable – the loaded (or filtered) dataset
// ---------------------------------------------------------------------------

/// Survey rows with lookups used by the filter widgets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurveyTable {
    records: Vec<SurveyRecord>,
    /// Distinct countries, in order of first appearance.
    countries: Vec<String>,
    /// Global (min, max) age; `None` for an empty table.
    age_bounds: Option<(u32, u32)>,
}

impl SurveyTable {
    pub fn from_records(records: Vec<SurveyRecord>) -> Self {
        let mut seen = HashSet::new();
        let countries = records
            .iter()
            .filter(|r| seen.insert(r.country.as_str()))
            .map(|r| r.country.clone())
            .collect();

        let age_bounds = records.iter().map(|r| r.age).fold(None, |acc, age| match acc {
            None => Some((age, age)),
            Some((lo, hi)) => Some((lo.min(age), hi.max(age))),
        });

        SurveyTable {
            records,
            countries,
            age_bounds,
        }
    }

    pub fn records(&self) -> &[SurveyRecord] {
        &self.records
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn age_bounds(&self) -> Option<(u32, u32)> {
        self.age_bounds
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
