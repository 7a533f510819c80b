// Adapters layer: concrete record sources and output renderers.

pub mod gene_panel;
pub mod tsv_source;
pub mod xlsx;

pub use gene_panel::{GenePanel, PanelFilter};
pub use tsv_source::{TsvRecordSource, VecRecordSource};
pub use xlsx::XlsxWriter;
