pub mod annotate;
pub mod classify;
pub mod emit;
pub mod etl;
pub mod filter;
pub mod pipeline;
pub mod projection;
pub mod sort;

pub use crate::domain::model::{
    FilterCriterion, Frequency, ReportField, ReportRow, ReportSets, VariantRecord,
};
pub use crate::domain::ports::{
    ConfigProvider, Pipeline, RecordSource, SpreadsheetReport, SpreadsheetWriter,
};
pub use crate::utils::error::Result;
