//! Clinical exome report generation.
//!
//! Annotated variant records are projected onto a fixed set of report
//! columns, sorted, split into all and frequency-filtered rows, and written
//! as a workbook, a tab-separated table and an IGV region list.

pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::ReportConfig;

pub use adapters::{GenePanel, PanelFilter, TsvRecordSource, VecRecordSource, XlsxWriter};
pub use core::{etl::EtlEngine, pipeline::ReportPipeline};
pub use utils::error::{ReportError, Result};
