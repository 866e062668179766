//! CSV ingest for sweep inputs.
//!
//! Two inputs:
//! - the initial-parameter tables (`1.csv ..= N.csv`), one sample each
//! - the results table, one row per sample, backward-filled per column
//!
//! Missing files and missing required columns fail the run (exit code 2).
//! Unparsable numeric cells are treated as missing and counted.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::path::{Path, PathBuf};

use csv::StringRecord;

use crate::domain::{BioParam, ParameterSample};
use crate::error::AppError;

/// Results table with every column parsed as `f64` and backward-filled.
#[derive(Debug, Clone, Default)]
pub struct ResultsTable {
    headers: Vec<String>,
    columns: HashMap<String, Vec<f64>>,
    rows: usize,
    /// Cells that were empty, `NaN`, or not numeric before filling.
    pub missing_cells: usize,
}

impl ResultsTable {
    /// Build a table from raw columns, applying the backward fill.
    pub fn from_columns(columns: Vec<(String, Vec<Option<f64>>)>) -> Self {
        let rows = columns.iter().map(|(_, c)| c.len()).max().unwrap_or(0);
        let mut headers = Vec::with_capacity(columns.len());
        let mut filled = HashMap::with_capacity(columns.len());
        let mut missing_cells = 0;

        for (name, mut values) in columns {
            values.resize(rows, None);
            missing_cells += values.iter().filter(|v| v.is_none()).count();
            headers.push(name.clone());
            // First column wins when a header repeats.
            match filled.entry(name) {
                Entry::Vacant(slot) => {
                    slot.insert(backward_fill(&values));
                }
                Entry::Occupied(slot) => {
                    tracing::warn!(column = %slot.key(), "ignoring repeated results column");
                }
            }
        }

        Self {
            headers,
            columns: filled,
            rows,
            missing_cells,
        }
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
}

/// Replace each missing value with the next present value after it.
///
/// Values with nothing present after them stay `NaN`.
pub fn backward_fill(values: &[Option<f64>]) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    let mut next = f64::NAN;
    for (idx, value) in values.iter().enumerate().rev() {
        if let Some(v) = value {
            next = *v;
        }
        out[idx] = next;
    }
    out
}

/// Path of the `index`-th (1-based) initial-parameters table.
pub fn parameter_table_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("{index}.csv"))
}

/// Load `count` initial-parameter tables from `dir`, in order.
pub fn load_parameter_samples(dir: &Path, count: usize) -> Result<Vec<ParameterSample>, AppError> {
    if count == 0 {
        return Err(AppError::shape("Parameter table count must be > 0."));
    }
    (1..=count)
        .map(|i| load_parameter_sample(&parameter_table_path(dir, i)))
        .collect()
}

/// Load one initial-parameters table; the sample is its first data row.
pub fn load_parameter_sample(path: &Path) -> Result<ParameterSample, AppError> {
    let mut reader = open_csv(path)?;
    let headers = read_headers(&mut reader, path)?;
    let header_map = build_header_map(&headers);

    for param in BioParam::ALL {
        if !header_map.contains_key(param.column()) {
            return Err(AppError::input(format!(
                "Missing required column `{param}` in '{}'",
                path.display()
            )));
        }
    }

    let mut records = reader.records();
    let record = match records.next() {
        Some(Ok(record)) => record,
        Some(Err(e)) => {
            return Err(AppError::input(format!(
                "CSV parse error in '{}': {e}",
                path.display()
            )));
        }
        None => {
            return Err(AppError::shape(format!(
                "Parameter table '{}' has no data rows.",
                path.display()
            )));
        }
    };

    let extra = records.count();
    if extra > 0 {
        tracing::warn!(path = %path.display(), extra, "parameter table has extra rows; using the first");
    }

    let value = |param: BioParam| -> Result<f64, AppError> {
        get_required(&record, &header_map, param.column())
            .and_then(|s| {
                parse_f64(s).ok_or_else(|| format!("Invalid `{param}` value '{s}'"))
            })
            .map_err(|e| AppError::input(format!("{e} in '{}'", path.display())))
    };

    Ok(ParameterSample {
        b: value(BioParam::B)?,
        d: value(BioParam::D)?,
        dd: value(BioParam::Dd)?,
        sigma_m: value(BioParam::SigmaM)?,
        sigma_w: value(BioParam::SigmaW)?,
    })
}

/// Load the results table, parsing every column as numeric.
pub fn load_results(path: &Path) -> Result<ResultsTable, AppError> {
    let mut reader = open_csv(path)?;
    let headers = read_headers(&mut reader, path)?;

    let names: Vec<String> = headers.iter().map(normalize_header_name).collect();
    let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); names.len()];

    for (idx, result) in reader.records().enumerate() {
        // +2: header line plus 1-based numbering.
        let line = idx + 2;
        let record = result.map_err(|e| {
            AppError::input(format!(
                "CSV parse error in '{}' at line {line}: {e}",
                path.display()
            ))
        })?;
        for (col, values) in columns.iter_mut().enumerate() {
            values.push(record.get(col).and_then(|s| parse_f64(s.trim())));
        }
    }

    let table = ResultsTable::from_columns(names.into_iter().zip(columns).collect());
    if table.missing_cells > 0 {
        tracing::info!(
            path = %path.display(),
            missing = table.missing_cells,
            "backward-filled missing result cells"
        );
    }
    Ok(table)
}

fn open_csv(path: &Path) -> Result<csv::Reader<File>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;

    Ok(csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file))
}

fn read_headers(reader: &mut csv::Reader<File>, path: &Path) -> Result<StringRecord, AppError> {
    reader
        .headers()
        .map(Clone::clone)
        .map_err(|e| AppError::input(format!("Failed to read CSV headers of '{}': {e}", path.display())))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Strip a UTF-8 BOM that spreadsheet exports put on the first header.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

/// Parse a numeric cell; `NaN` and non-numeric text count as missing.
fn parse_f64(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    if v.is_nan() { None } else { Some(v) }
}
