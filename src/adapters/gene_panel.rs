use crate::adapters::tsv_source::{line_of, read_header, tab_reader};
use crate::domain::model::ReportField;
use crate::domain::ports::{RecordIter, RecordSource};
use crate::utils::error::{ReportError, Result};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const GENE_COLUMNS: [&str; 4] = ["gene", "genesymbol", "gene_symbol", "gene symbol"];
const INHERITANCE_COLUMN: &str = "inheritance";

/// Genes covered by a gene panel, read from its transcripts file.
#[derive(Debug, Clone, Default)]
pub struct GenePanel {
    genes: BTreeMap<String, Option<String>>,
}

impl GenePanel {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let name = path.as_ref().display().to_string();
        Self::from_reader(File::open(path)?, &name)
    }

    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self> {
        let format_error = |line: usize, message: String| ReportError::InputFormatError {
            source_name: source_name.to_string(),
            line,
            message,
        };

        let mut rows = tab_reader(reader).into_records();
        let header = read_header(&mut rows)?
            .ok_or_else(|| format_error(1, "transcripts file is empty".to_string()))?;
        let position = |wanted: &[&str]| {
            header
                .iter()
                .position(|h| wanted.contains(&h.to_ascii_lowercase().as_str()))
        };
        let gene_col = position(&GENE_COLUMNS[..])
            .ok_or_else(|| format_error(1, "no gene column in header".to_string()))?;
        let inheritance_col = position(&[INHERITANCE_COLUMN][..]);

        let mut genes: BTreeMap<String, Option<String>> = BTreeMap::new();
        for row in rows {
            let row = row?;
            if row.get(0).is_some_and(|first| first.starts_with('#')) {
                continue;
            }
            let gene = row.get(gene_col).map(str::trim).ok_or_else(|| {
                format_error(line_of(&row), format!("missing column {}", gene_col + 1))
            })?;
            if gene.is_empty() {
                continue;
            }
            let inheritance = inheritance_col
                .and_then(|col| row.get(col))
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string);

            let entry = genes.entry(gene.to_string()).or_default();
            if entry.is_none() {
                *entry = inheritance;
            }
        }

        tracing::debug!("Gene panel {} covers {} genes", source_name, genes.len());
        Ok(Self { genes })
    }

    pub fn contains(&self, gene: &str) -> bool {
        self.genes.contains_key(gene)
    }

    pub fn inheritance(&self, gene: &str) -> Option<&str> {
        self.genes.get(gene).and_then(|i| i.as_deref())
    }

    pub fn gene_count(&self) -> usize {
        self.genes.len()
    }
}

/// Restricts a record source to panel genes and fills in missing inheritance.
///
/// Records without a gene field are passed through untouched so that
/// projection reports them as malformed instead of dropping them here.
pub struct PanelFilter<S> {
    inner: S,
    panel: GenePanel,
    dropped: Cell<usize>,
}

impl<S: RecordSource> PanelFilter<S> {
    pub fn new(inner: S, panel: GenePanel) -> Self {
        Self {
            inner,
            panel,
            dropped: Cell::new(0),
        }
    }

    /// Records dropped during the most recent traversal.
    pub fn dropped(&self) -> usize {
        self.dropped.get()
    }
}

impl<S: RecordSource> RecordSource for PanelFilter<S> {
    fn records(&self) -> Result<RecordIter<'_>> {
        self.dropped.set(0);
        let gene_key = ReportField::Gene.source_name();
        let inheritance_key = ReportField::Inheritance.source_name();

        let iter = self.inner.records()?.filter_map(move |record| {
            let mut record = match record {
                Ok(record) => record,
                Err(e) => return Some(Err(e)),
            };
            let Some(gene) = record.get(gene_key).map(str::to_string) else {
                return Some(Ok(record));
            };
            if !self.panel.contains(&gene) {
                tracing::debug!("Dropping variant in {}: gene not in panel", gene);
                self.dropped.set(self.dropped.get() + 1);
                return None;
            }
            let has_inheritance = record
                .get(inheritance_key)
                .is_some_and(|value| !value.trim().is_empty());
            if !has_inheritance {
                if let Some(inheritance) = self.panel.inheritance(&gene) {
                    record.insert(inheritance_key, inheritance);
                }
            }
            Some(Ok(record))
        });
        Ok(Box::new(iter))
    }

    fn describe(&self) -> String {
        format!("{} (panel of {} genes)", self.inner.describe(), self.panel.gene_count())
    }
}
