use crate::domain::model::{ReportField, ReportRow};
use crate::domain::ports::{SpreadsheetReport, SpreadsheetWriter};
use crate::utils::error::{ReportError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn tab_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

/// Header plus one tab-separated line per row.
pub struct TabularTextEmitter;

impl TabularTextEmitter {
    pub fn emit<W: Write>(&self, writer: W, header: &[String], rows: &[ReportRow]) -> Result<()> {
        let mut wtr = tab_writer(writer);
        wtr.write_record(header)?;
        for row in rows {
            wtr.write_record(row.values())?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_to_path(&self, path: &Path, header: &[String], rows: &[ReportRow]) -> Result<()> {
        tracing::debug!("Writing {} rows to {}", rows.len(), path.display());
        self.emit(create(path)?, header, rows)
    }
}

/// One zero-based, half-open interval per row around the variant position.
pub struct RegionEmitter;

impl RegionEmitter {
    fn interval(row: &ReportRow) -> Result<(u64, u64)> {
        let raw = row.get(ReportField::Pos);
        match raw.trim().parse::<u64>() {
            Ok(pos) if pos > 0 => Ok((pos - 1, pos)),
            _ => Err(ReportError::InvalidPosition {
                value: raw.to_string(),
            }),
        }
    }

    pub fn emit<W: Write>(&self, writer: W, rows: &[ReportRow]) -> Result<()> {
        let mut wtr = tab_writer(writer);
        for row in rows {
            let (start, end) = Self::interval(row)?;
            let (start, end) = (start.to_string(), end.to_string());
            wtr.write_record([
                row.get(ReportField::Chr),
                start.as_str(),
                end.as_str(),
                row.get(ReportField::Gene),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_to_path(&self, path: &Path, rows: &[ReportRow]) -> Result<()> {
        tracing::debug!("Writing {} regions to {}", rows.len(), path.display());
        self.emit(create(path)?, rows)
    }
}

/// Hands both row sets to a spreadsheet renderer.
pub struct TableEmitter<'w> {
    writer: &'w dyn SpreadsheetWriter,
}

impl<'w> TableEmitter<'w> {
    pub fn new(writer: &'w dyn SpreadsheetWriter) -> Self {
        Self { writer }
    }

    pub fn write_to_path(
        &self,
        path: &Path,
        header: &[String],
        all: &[ReportRow],
        filtered: &[ReportRow],
        header_label: Option<&str>,
    ) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let report = SpreadsheetReport {
            header,
            all,
            filtered,
            header_label,
        };
        self.writer.write(path, &report)
    }
}
