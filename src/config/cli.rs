use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{validate_existing_file, validate_non_empty_string, validate_path, Validate};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "exome-report")]
#[command(
    about = "Creates report files from an annotated variant table for use in HTS interpretation"
)]
pub struct CliConfig {
    /// Annotated variant table (tab-separated, one header line)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Transcript file from the gene panel
    #[arg(long)]
    pub transcripts: PathBuf,

    /// Write an Excel workbook to this path
    #[arg(long)]
    pub excel: Option<PathBuf>,

    /// Write a tab-separated table of all variants to this path
    #[arg(long)]
    pub tsv: Option<PathBuf>,

    /// Write an IGV region list of the filtered variants to this path
    #[arg(long)]
    pub igv: Option<PathBuf>,

    /// Section label shown above the filtered variants in the workbook
    #[arg(long)]
    pub header: Option<String>,

    /// Optional TOML file overriding filter criteria and intronic cut-offs
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit log lines as JSON
    #[arg(long)]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &Path {
        &self.input
    }

    fn transcripts_path(&self) -> &Path {
        &self.transcripts
    }

    fn excel_path(&self) -> Option<&Path> {
        self.excel.as_deref()
    }

    fn tsv_path(&self) -> Option<&Path> {
        self.tsv.as_deref()
    }

    fn igv_path(&self) -> Option<&Path> {
        self.igv.as_deref()
    }

    fn header_label(&self) -> Option<&str> {
        self.header.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if !self.has_output_target() {
            return Err(ReportError::NoOutputTarget);
        }
        validate_existing_file("input", &self.input)?;
        validate_existing_file("transcripts", &self.transcripts)?;
        for (name, path) in [("excel", &self.excel), ("tsv", &self.tsv), ("igv", &self.igv)] {
            if let Some(path) = path {
                validate_path(name, path)?;
            }
        }
        if let Some(config) = &self.config {
            validate_existing_file("config", config)?;
        }
        if let Some(header) = &self.header {
            validate_non_empty_string("header", header)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("exome-report").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_no_output_target_fails_first() {
        let config = parse(&["-i", "/missing/in.tsv", "--transcripts", "/missing/tx.tsv"]);
        assert!(!config.has_output_target());
        assert!(matches!(config.validate(), Err(ReportError::NoOutputTarget)));
    }

    #[test]
    fn test_valid_configuration() {
        let input = NamedTempFile::new().unwrap();
        let transcripts = NamedTempFile::new().unwrap();
        let config = parse(&[
            "-i",
            input.path().to_str().unwrap(),
            "--transcripts",
            transcripts.path().to_str().unwrap(),
            "--igv",
            "out.bed",
            "--header",
            "Exome",
        ]);
        assert!(config.validate().is_ok());
        assert_eq!(config.igv_path(), Some(Path::new("out.bed")));
        assert_eq!(config.header_label(), Some("Exome"));
        assert_eq!(config.excel_path(), None);
    }

    #[test]
    fn test_missing_input_file() {
        let transcripts = NamedTempFile::new().unwrap();
        let config = parse(&[
            "-i",
            "/no/such/input.tsv",
            "--transcripts",
            transcripts.path().to_str().unwrap(),
            "--tsv",
            "out.tsv",
        ]);
        assert!(matches!(
            config.validate(),
            Err(ReportError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_required_arguments() {
        assert!(CliConfig::try_parse_from(["exome-report", "--tsv", "out.tsv"]).is_err());
    }
}
