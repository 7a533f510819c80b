use crate::domain::model::{ReportRow, ReportSets, VariantRecord};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

pub type RecordIter<'a> = Box<dyn Iterator<Item = Result<VariantRecord>> + 'a>;

/// Yields raw variant records. Every call to `records` starts a fresh traversal.
pub trait RecordSource {
    fn records(&self) -> Result<RecordIter<'_>>;

    /// Name used in log lines and error messages.
    fn describe(&self) -> String;
}

/// What a spreadsheet renderer needs from the core.
#[derive(Debug, Clone, Copy)]
pub struct SpreadsheetReport<'a> {
    pub header: &'a [String],
    pub all: &'a [ReportRow],
    pub filtered: &'a [ReportRow],
    pub header_label: Option<&'a str>,
}

pub trait SpreadsheetWriter {
    fn write(&self, path: &Path, report: &SpreadsheetReport<'_>) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &Path;
    fn transcripts_path(&self) -> &Path;
    fn excel_path(&self) -> Option<&Path>;
    fn tsv_path(&self) -> Option<&Path>;
    fn igv_path(&self) -> Option<&Path>;
    fn header_label(&self) -> Option<&str>;

    fn has_output_target(&self) -> bool {
        self.excel_path().is_some() || self.tsv_path().is_some() || self.igv_path().is_some()
    }
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<VariantRecord>>;
    fn transform(&self, records: Vec<VariantRecord>) -> Result<ReportSets>;
    /// Writes every requested output and returns the paths written.
    fn load(&self, sets: ReportSets) -> Result<Vec<PathBuf>>;
}
