use crate::core::Pipeline;
use crate::utils::error::Result;
use std::path::PathBuf;
use std::time::Instant;

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub records: usize,
    pub rows: usize,
    pub filtered_rows: usize,
    pub count_label: String,
    pub outputs: Vec<PathBuf>,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub fn into_pipeline(self) -> P {
        self.pipeline
    }

    pub fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        tracing::info!("Starting report generation");

        let raw_data = self.pipeline.extract()?;
        let records = raw_data.len();

        let sets = self.pipeline.transform(raw_data)?;
        let rows = sets.all.len();
        let filtered_rows = sets.filtered.len();
        let count_label = sets.count_label.clone();

        let outputs = self.pipeline.load(sets)?;

        tracing::info!(
            records,
            rows,
            filtered_rows,
            outputs = outputs.len(),
            "✅ Report generated in {:?}",
            started.elapsed()
        );

        Ok(RunSummary {
            records,
            rows,
            filtered_rows,
            count_label,
            outputs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ReportSets, VariantRecord};
    use crate::utils::error::ReportError;
    use std::cell::RefCell;

    struct MockPipeline {
        records: usize,
        fail_transform: bool,
        steps: RefCell<Vec<&'static str>>,
    }

    impl MockPipeline {
        fn new(records: usize) -> Self {
            Self {
                records,
                fail_transform: false,
                steps: RefCell::new(Vec::new()),
            }
        }
    }

    impl Pipeline for MockPipeline {
        fn extract(&self) -> Result<Vec<VariantRecord>> {
            self.steps.borrow_mut().push("extract");
            Ok(vec![VariantRecord::new(); self.records])
        }

        fn transform(&self, records: Vec<VariantRecord>) -> Result<ReportSets> {
            self.steps.borrow_mut().push("transform");
            if self.fail_transform {
                return Err(ReportError::MissingField {
                    field: "Gene".to_string(),
                    record: 1,
                });
            }
            Ok(ReportSets {
                header: Vec::new(),
                all: Vec::new(),
                filtered: Vec::new(),
                count_label: format!("seen {}", records.len()),
            })
        }

        fn load(&self, _sets: ReportSets) -> Result<Vec<PathBuf>> {
            self.steps.borrow_mut().push("load");
            Ok(vec![PathBuf::from("out.tsv")])
        }
    }

    #[test]
    fn test_run_executes_steps_in_order() {
        let engine = EtlEngine::new(MockPipeline::new(4));
        let summary = engine.run().unwrap();
        assert_eq!(summary.records, 4);
        assert_eq!(summary.count_label, "seen 4");
        assert_eq!(summary.outputs, vec![PathBuf::from("out.tsv")]);
        assert_eq!(
            *engine.pipeline().steps.borrow(),
            vec!["extract", "transform", "load"]
        );
    }

    #[test]
    fn test_failed_transform_skips_load() {
        let mut pipeline = MockPipeline::new(1);
        pipeline.fail_transform = true;
        let engine = EtlEngine::new(pipeline);
        assert!(engine.run().is_err());
        assert_eq!(*engine.pipeline().steps.borrow(), vec!["extract", "transform"]);
    }
}
