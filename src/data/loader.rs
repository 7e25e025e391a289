use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float64Type, Int32Type, Int64Type, Schema};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{Field, SurveyRecord, SurveyTable};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// DatasetSource – load-once handle
// ---------------------------------------------------------------------------

/// A survey file that is read at most once.
///
/// The first successful [`DatasetSource::load`] reads storage; every later
/// call hands back the same shared table. There is no invalidation, so build
/// one source at startup and pass it around by reference.
#[derive(Debug)]
pub struct DatasetSource {
    path: PathBuf,
    table: OnceLock<Arc<SurveyTable>>,
}

impl DatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the table has already been read.
    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    pub fn load(&self) -> Result<Arc<SurveyTable>> {
        if let Some(table) = self.table.get() {
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(load_file(&self.path)?);
        log::info!(
            "Loaded {} survey responses from {} countries ({})",
            table.len(),
            table.countries().len(),
            self.path.display()
        );
        Ok(Arc::clone(self.table.get_or_init(|| table)))
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a survey table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the survey column names
/// * `.parquet` – same column names; string answers and an integer age
pub fn load_file(path: &Path) -> Result<SurveyTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DashboardError::load(
            path,
            format!("unsupported file extension: .{other}"),
        )),
    }
}

/// Position of every survey column, in `Field::ALL` order.
fn locate_columns(headers: &[&str], path: &Path) -> Result<[usize; Field::COUNT]> {
    let mut positions = [0usize; Field::COUNT];
    for (slot, field) in positions.iter_mut().zip(Field::ALL) {
        *slot = headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == field.header())
            .ok_or_else(|| DashboardError::MissingColumn {
                column: field.header().to_string(),
                path: path.to_path_buf(),
            })?;
    }
    Ok(positions)
}

fn parse_age(raw: &str, row: usize, path: &Path) -> Result<u32> {
    let raw = raw.trim();
    if let Ok(age) = raw.parse::<u32>() {
        return Ok(age);
    }
    // Exported frames sometimes write integer ages as `31.0`.
    match raw.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) => Ok(v as u32),
        _ => Err(DashboardError::load(
            path,
            format!("row {row}: '{raw}' is not a valid age"),
        )),
    }
}

fn build_record(mut cell: impl FnMut(Field) -> Result<String>, age: u32) -> Result<SurveyRecord> {
    Ok(SurveyRecord {
        country: cell(Field::Country)?,
        age,
        gender: cell(Field::Gender)?,
        sought_treatment: cell(Field::SoughtTreatment)?,
        family_history: cell(Field::FamilyHistory)?,
        remote_work: cell(Field::RemoteWork)?,
        work_interference: cell(Field::WorkInterference)?,
        discussion_consequence: cell(Field::DiscussionConsequence)?,
        mental_vs_physical: cell(Field::MentalVsPhysical)?,
        talks_to_coworkers: cell(Field::TalksToCoworkers)?,
        talks_to_supervisor: cell(Field::TalksToSupervisor)?,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<SurveyTable> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| DashboardError::load(path, e))?;
    let headers = reader
        .headers()
        .map_err(|e| DashboardError::load(path, format!("reading CSV headers: {e}")))?
        .clone();
    let names: Vec<&str> = headers.iter().collect();
    let columns = locate_columns(&names, path)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.map_err(|e| DashboardError::load(path, format!("CSV row {row_no}: {e}")))?;
        let text = |field: Field| -> Result<String> {
            Ok(row.get(columns[field.index()]).unwrap_or("").to_string())
        };
        let age = parse_age(&text(Field::Age)?, row_no, path)?;
        records.push(build_record(text, age)?);
    }

    Ok(SurveyTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file whose columns carry the survey header names.
///
/// Answers may be Utf8 or LargeUtf8; age may be any of Int32, Int64 or
/// Float64. Null answers become empty strings, null ages are an error.
fn load_parquet(path: &Path) -> Result<SurveyTable> {
    let file = std::fs::File::open(path).map_err(|e| DashboardError::load(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| DashboardError::load(path, format!("reading parquet metadata: {e}")))?;

    let schema: &Schema = builder.schema();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    let columns = locate_columns(&names, path)?;

    let reader = builder
        .build()
        .map_err(|e| DashboardError::load(path, format!("building parquet reader: {e}")))?;

    let mut records = Vec::new();
    let mut offset = 0usize;
    for batch_result in reader {
        let batch = batch_result
            .map_err(|e| DashboardError::load(path, format!("reading parquet record batch: {e}")))?;
        for row in 0..batch.num_rows() {
            let row_no = offset + row;
            let column = |field: Field| batch.column(columns[field.index()]);
            let age = extract_age(column(Field::Age), row)
                .map_err(|reason| DashboardError::load(path, format!("row {row_no}: {reason}")))?;
            let text = |field: Field| -> Result<String> {
                extract_text(column(field), row).map_err(|reason| {
                    DashboardError::load(path, format!("row {row_no}, {field}: {reason}"))
                })
            };
            records.push(build_record(text, age)?);
        }
        offset += batch.num_rows();
    }

    Ok(SurveyTable::from_records(records))
}

// -- Arrow helpers --

fn extract_text(col: &ArrayRef, row: usize) -> std::result::Result<String, String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => Err(format!("expected a string column, got {other:?}")),
    }
}

fn extract_age(col: &ArrayRef, row: usize) -> std::result::Result<u32, String> {
    if col.is_null(row) {
        return Err("missing age".to_string());
    }
    let value: i64 = match col.data_type() {
        DataType::Int32 => i64::from(col.as_primitive::<Int32Type>().value(row)),
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row),
        DataType::Float64 => {
            let v = col.as_primitive::<Float64Type>().value(row);
            if v.fract() != 0.0 {
                return Err(format!("age {v} is not an integer"));
            }
            v as i64
        }
        other => return Err(format!("expected an integer age column, got {other:?}")),
    };
    u32::try_from(value).map_err(|_| format!("age {value} is out of range"))
}
