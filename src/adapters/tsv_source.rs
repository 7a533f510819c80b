use crate::domain::model::VariantRecord;
use crate::domain::ports::{RecordIter, RecordSource};
use crate::utils::error::{ReportError, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub(crate) fn tab_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader)
}

pub(crate) fn line_of(record: &csv::StringRecord) -> usize {
    record.position().map(|p| p.line() as usize).unwrap_or(0)
}

/// Reads the column names from the first line that is not a `##` meta line.
/// A leading `#` on the header itself is dropped.
pub(crate) fn read_header<I>(rows: &mut I) -> Result<Option<Vec<String>>>
where
    I: Iterator<Item = csv::Result<csv::StringRecord>>,
{
    for row in rows {
        let row = row?;
        if row.get(0).is_some_and(|first| first.starts_with("##")) {
            continue;
        }
        let names = row
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name = if i == 0 { name.trim_start_matches('#') } else { name };
                name.trim().to_string()
            })
            .collect();
        return Ok(Some(names));
    }
    Ok(None)
}

/// Annotated variant table: one header line naming the fields, then one
/// tab-separated line per variant-transcript combination.
#[derive(Debug, Clone)]
pub struct TsvRecordSource {
    path: PathBuf,
}

impl TsvRecordSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RecordSource for TsvRecordSource {
    fn records(&self) -> Result<RecordIter<'_>> {
        let mut rows = tab_reader(File::open(&self.path)?).into_records();
        let Some(names) = read_header(&mut rows)? else {
            tracing::warn!("{} is empty", self.describe());
            return Ok(Box::new(std::iter::empty::<Result<VariantRecord>>()));
        };

        Ok(Box::new(rows.map(move |row| {
            let row = row?;
            if row.len() != names.len() {
                return Err(ReportError::InputFormatError {
                    source_name: self.describe(),
                    line: line_of(&row),
                    message: format!("expected {} columns, found {}", names.len(), row.len()),
                });
            }
            Ok(names
                .iter()
                .map(String::as_str)
                .zip(row.iter())
                .collect::<VariantRecord>())
        })))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Records already held in memory.
#[derive(Debug, Clone, Default)]
pub struct VecRecordSource {
    records: Vec<VariantRecord>,
}

impl VecRecordSource {
    pub fn new(records: Vec<VariantRecord>) -> Self {
        Self { records }
    }
}

impl RecordSource for VecRecordSource {
    fn records(&self) -> Result<RecordIter<'_>> {
        Ok(Box::new(self.records.iter().cloned().map(Ok::<_, ReportError>)))
    }

    fn describe(&self) -> String {
        format!("{} in-memory records", self.records.len())
    }
}
