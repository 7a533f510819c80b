use crate::adapters::xlsx::XlsxWriter;
use crate::config::toml_config::ReportConfig;
use crate::core::annotate::CountAnnotator;
use crate::core::classify::IntronProximityClassifier;
use crate::core::emit::{RegionEmitter, TableEmitter, TabularTextEmitter};
use crate::core::filter::FrequencyFilter;
use crate::core::projection::{FieldProjector, FieldSpec};
use crate::core::sort::Sorter;
use crate::core::{ConfigProvider, Pipeline, RecordSource, ReportSets, SpreadsheetWriter, VariantRecord};
use crate::utils::error::{ReportError, Result};
use std::path::PathBuf;

/// Builds the clinical report from one record source.
pub struct ReportPipeline<S: RecordSource, C: ConfigProvider> {
    source: S,
    config: C,
    classifier: IntronProximityClassifier,
    marker: String,
    filter: FrequencyFilter,
    sorter: Sorter,
    spreadsheet: Box<dyn SpreadsheetWriter>,
}

impl<S: RecordSource, C: ConfigProvider> ReportPipeline<S, C> {
    /// Fails before touching any input when no output target is configured.
    pub fn new(source: S, config: C, settings: &ReportConfig) -> Result<Self> {
        if !config.has_output_target() {
            return Err(ReportError::NoOutputTarget);
        }
        Ok(Self {
            source,
            config,
            classifier: settings.classifier(),
            marker: settings.intronic.marker.clone(),
            filter: settings.frequency_filter()?,
            sorter: Sorter::default(),
            spreadsheet: Box::new(XlsxWriter),
        })
    }

    pub fn with_spreadsheet_writer(mut self, writer: Box<dyn SpreadsheetWriter>) -> Self {
        self.spreadsheet = writer;
        self
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: RecordSource, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    fn extract(&self) -> Result<Vec<VariantRecord>> {
        tracing::info!("📥 Reading records from {}", self.source.describe());
        let records = self.source.records()?.collect::<Result<Vec<_>>>()?;
        tracing::info!("📥 Read {} records", records.len());
        Ok(records)
    }

    fn transform(&self, records: Vec<VariantRecord>) -> Result<ReportSets> {
        let label = CountAnnotator::default().annotate(&records);
        tracing::info!("🔄 Mutation count column: {}", label.label());

        let projector = FieldProjector::new(
            FieldSpec::standard(&label),
            self.classifier.clone(),
            self.marker.clone(),
        );
        let mut all = projector.project_all(&records)?;
        drop(records);

        self.sorter.sort(&mut all);
        let filtered = self.filter.rare(&all);
        tracing::info!(
            "🔄 {} rows, {} below every frequency threshold",
            all.len(),
            filtered.len()
        );

        Ok(ReportSets {
            header: projector.spec().header(),
            all,
            filtered,
            count_label: label.label(),
        })
    }

    fn load(&self, sets: ReportSets) -> Result<Vec<PathBuf>> {
        if !self.config.has_output_target() {
            return Err(ReportError::NoOutputTarget);
        }
        let mut written = Vec::new();

        if let Some(path) = self.config.excel_path() {
            TableEmitter::new(&*self.spreadsheet).write_to_path(
                path,
                &sets.header,
                &sets.all,
                &sets.filtered,
                self.config.header_label(),
            )?;
            tracing::info!("💾 Workbook written to {}", path.display());
            written.push(path.to_path_buf());
        }

        if let Some(path) = self.config.tsv_path() {
            TabularTextEmitter.write_to_path(path, &sets.header, &sets.all)?;
            tracing::info!("💾 Table written to {}", path.display());
            written.push(path.to_path_buf());
        }

        if let Some(path) = self.config.igv_path() {
            RegionEmitter.write_to_path(path, &sets.filtered)?;
            tracing::info!("💾 Regions written to {}", path.display());
            written.push(path.to_path_buf());
        }

        Ok(written)
    }
}
