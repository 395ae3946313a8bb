use super::{DataError, DatasetDescriptor, MeasurementRow, MeasurementTable};
use serde::Deserialize;
use std::{fs::File, io, path::Path};

/// Column layout written by the systematic test. The firmware names the first
/// column `tRCD in ns`; files cleaned up by hand use `tRCD`.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "tRCD", alias = "tRCD in ns")]
    trcd: f64,
    retention: f64,
    #[serde(rename = "FehlerProzent")]
    error_percent: f64,
    #[serde(rename = "FehlerAbs", default)]
    error_count: Option<u64>,
}

/// Header names accepted for each required column.
const REQUIRED_COLUMNS: [&[&str]; 3] = [&["tRCD", "tRCD in ns"], &["retention"], &["FehlerProzent"]];

pub fn load_table(descriptor: &DatasetDescriptor) -> Result<MeasurementTable, DataError> {
    let path = descriptor.path.as_path();
    let file = File::open(path).map_err(|err| open_error(path, err))?;
    let rows = read_rows(path, file)?;
    let table = MeasurementTable::new(descriptor.dataset_label(), path, rows);
    tracing::debug!(
        rows = table.len(),
        errors = table.total_error_count(),
        "loaded {}",
        path.display()
    );
    Ok(table)
}

fn open_error(path: &Path, err: io::Error) -> DataError {
    if err.kind() == io::ErrorKind::NotFound {
        DataError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        DataError::Io {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

fn read_rows<R: io::Read>(path: &Path, input: R) -> Result<Vec<MeasurementRow>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let malformed = |line: u64, message: String| DataError::MalformedRow {
        path: path.to_path_buf(),
        line,
        message,
    };

    let headers = reader
        .headers()
        .map_err(|err| malformed(1, err.to_string()))?
        .clone();
    if headers.iter().all(str::is_empty) {
        return Err(malformed(1, "missing header row".into()));
    }
    for names in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| names.contains(&h)) {
            return Err(malformed(1, format!("missing column `{}`", names[0])));
        }
    }

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    let mut line = 1;
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => {
                let at = err.position().map(|p| p.line()).unwrap_or(line + 1);
                return Err(malformed(at, err.to_string()));
            }
        }
        line = record.position().map(|p| p.line()).unwrap_or(line + 1);

        let raw: RawRecord = record
            .deserialize(Some(&headers))
            .map_err(|err| malformed(line, err.to_string()))?;
        for (name, value) in [
            ("tRCD", raw.trcd),
            ("retention", raw.retention),
            ("FehlerProzent", raw.error_percent),
        ] {
            if !value.is_finite() {
                return Err(malformed(line, format!("{name} is not a finite number")));
            }
        }
        rows.push(MeasurementRow {
            trcd_ns: raw.trcd,
            error_percent: raw.error_percent,
            retention_secs: raw.retention,
            error_count: raw.error_count,
        });
    }
    Ok(rows)
}
