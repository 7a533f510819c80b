use clap::Parser;
use exome_report::utils::error::{ErrorSeverity, ReportError};
use exome_report::utils::{logger, validation::Validate};
use exome_report::{app, CliConfig, ReportConfig};

fn exit_code(e: &ReportError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: ReportError) -> ! {
    tracing::error!(
        "❌ Report generation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("🚀 Starting exome-report");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(e);
    }

    let settings = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            ReportConfig::from_file(path).unwrap_or_else(|e| fail(e))
        }
        None => ReportConfig::default(),
    };
    if let Err(e) = settings.validate() {
        fail(e);
    }

    match app::report::run(config, &settings) {
        Ok(summary) => {
            tracing::info!(
                "✅ {} of {} rows passed the frequency filter ({})",
                summary.filtered_rows,
                summary.rows,
                summary.count_label
            );
            for path in &summary.outputs {
                println!("📁 {}", path.display());
            }
            Ok(())
        }
        Err(e) => fail(e),
    }
}
