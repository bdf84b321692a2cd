use clap::Parser;
use data_flow::utils::logger;
use data_flow::{run_report_flow, CliConfig, EtlError, FlowOutcome, TomlConfig};

fn report_failure(e: &EtlError) -> ! {
    tracing::error!(
        "❌ Flow failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting data-flow");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let result: Result<FlowOutcome, EtlError> = match config.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(&path) {
                Ok(toml_config) => run_report_flow(toml_config).await,
                Err(e) => Err(e),
            }
        }
        None => run_report_flow(config).await,
    };

    match result {
        Ok(outcome) => {
            tracing::info!(
                "✅ Published {} of {} fetched records",
                outcome.rows_published,
                outcome.records_fetched
            );
            println!(
                "✅ Published {} rows to '{}'",
                outcome.rows_published,
                data_flow::PROCESSED_DATA_KEY
            );
        }
        Err(e) => report_failure(&e),
    }
}
