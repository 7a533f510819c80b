use crate::adapters::{GenePanel, PanelFilter, TsvRecordSource};
use crate::config::toml_config::ReportConfig;
use crate::core::etl::{EtlEngine, RunSummary};
use crate::core::pipeline::ReportPipeline;
use crate::core::{ConfigProvider, RecordSource};
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::Validate;

fn run_with_source<S: RecordSource, C: ConfigProvider>(
    source: S,
    config: C,
    settings: &ReportConfig,
) -> Result<(RunSummary, S)> {
    let pipeline = ReportPipeline::new(source, config, settings)?;
    let engine = EtlEngine::new(pipeline);
    let summary = engine.run()?;
    Ok((summary, engine.into_pipeline().into_source()))
}

/// Runs the whole report for the given input, gene panel and outputs.
pub fn run<C: ConfigProvider>(config: C, settings: &ReportConfig) -> Result<RunSummary> {
    if !config.has_output_target() {
        return Err(ReportError::NoOutputTarget);
    }
    settings.validate()?;

    let panel = GenePanel::from_file(config.transcripts_path())?;
    tracing::info!(
        "🧬 Gene panel {} covers {} genes",
        config.transcripts_path().display(),
        panel.gene_count()
    );
    let table = TsvRecordSource::new(config.input_path());

    if settings.panel.enabled {
        let (summary, filter) = run_with_source(PanelFilter::new(table, panel), config, settings)?;
        if filter.dropped() > 0 {
            tracing::info!("🧬 {} records outside the gene panel were skipped", filter.dropped());
        }
        Ok(summary)
    } else {
        tracing::info!("🧬 Gene panel filtering disabled");
        run_with_source(table, config, settings).map(|(summary, _)| summary)
    }
}
