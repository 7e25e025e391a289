use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field as ArrowField, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use survey_dash::{Field, SurveyRecord};

const RESPONDENTS: usize = 600;
const CSV_PATH: &str = "sample_survey.csv";
const PARQUET_PATH: &str = "sample_survey.parquet";

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Pick from `(value, weight)` pairs.
    fn weighted<'a>(&mut self, choices: &[(&'a str, f64)]) -> &'a str {
        let total: f64 = choices.iter().map(|(_, w)| w).sum();
        let mut roll = self.next_f64() * total;
        for &(value, weight) in choices {
            if roll < weight {
                return value;
            }
            roll -= weight;
        }
        choices.last().map_or("", |&(v, _)| v)
    }

    /// "Sim" with probability `p`, otherwise "Não".
    fn yes(&mut self, p: f64) -> String {
        let answer = if self.next_f64() < p { "Sim" } else { "Não" };
        answer.to_string()
    }
}

fn respondent(rng: &mut SimpleRng) -> SurveyRecord {
    let country = rng.weighted(&[
        ("Estados Unidos", 0.45),
        ("Reino Unido", 0.15),
        ("Canadá", 0.1),
        ("Brasil", 0.1),
        ("Alemanha", 0.08),
        ("Índia", 0.07),
        ("Portugal", 0.05),
    ]);
    let age = rng.gauss(33.0, 9.0).round().clamp(18.0, 72.0) as u32;
    let family_history = rng.yes(0.4);
    let treatment_p = if family_history == "Sim" { 0.7 } else { 0.35 };
    let talks_to_supervisor = rng.yes(0.4);

    SurveyRecord {
        country: country.to_string(),
        age,
        gender: rng
            .weighted(&[("Masculino", 0.75), ("Feminino", 0.2), ("Outro", 0.05)])
            .to_string(),
        sought_treatment: rng.yes(treatment_p),
        family_history,
        remote_work: rng.yes(0.3),
        work_interference: rng
            .weighted(&[("Never", 0.2), ("Rarely", 0.2), ("Sometimes", 0.45), ("Often", 0.15)])
            .to_string(),
        discussion_consequence: rng
            .weighted(&[("Não", 0.4), ("Talvez", 0.4), ("Sim", 0.2)])
            .to_string(),
        mental_vs_physical: rng
            .weighted(&[("Não sei", 0.45), ("Sim", 0.28), ("Não", 0.27)])
            .to_string(),
        talks_to_coworkers: rng.yes(0.3),
        talks_to_supervisor,
    }
}

fn write_csv(records: &[SurveyRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(CSV_PATH).context("creating CSV output")?;
    writer
        .write_record(Field::ALL.iter().map(|f| f.header()))
        .context("writing CSV header")?;
    for record in records {
        writer
            .write_record(Field::ALL.iter().map(|&f| record.label(f).into_owned()))
            .context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_parquet(records: &[SurveyRecord]) -> Result<()> {
    let mut fields = Vec::with_capacity(Field::COUNT);
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(Field::COUNT);
    for field in Field::ALL {
        if field == Field::Age {
            fields.push(ArrowField::new(field.header(), DataType::Int64, false));
            columns.push(Arc::new(Int64Array::from(
                records.iter().map(|r| i64::from(r.age)).collect::<Vec<_>>(),
            )));
        } else {
            fields.push(ArrowField::new(field.header(), DataType::Utf8, false));
            columns.push(Arc::new(StringArray::from(
                records
                    .iter()
                    .map(|r| r.label(field).into_owned())
                    .collect::<Vec<_>>(),
            )));
        }
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(PARQUET_PATH).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let records: Vec<SurveyRecord> = (0..RESPONDENTS).map(|_| respondent(&mut rng)).collect();

    write_csv(&records)?;
    write_parquet(&records)?;

    println!("Wrote {RESPONDENTS} survey responses to {CSV_PATH} and {PARQUET_PATH}");
    Ok(())
}
