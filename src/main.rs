use anyhow::Context;
use cep_weather::utils::logger;
use cep_weather::{app, CliConfig, Command, FailureOutcome};
use clap::Parser;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting cep-weather");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    let config = match cli.service_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if config.weather_api_key.is_empty() {
        tracing::warn!("WEATHER_API_KEY is not set; the weather service will reject lookups");
    }

    let engine = config
        .build_engine()
        .context("failed to build the forecast engine")?;

    match cli.command {
        Command::Serve => {
            let addr = config.socket_addr()?;
            let shutdown = CancellationToken::new();
            tokio::spawn(app::shutdown_on_signal(shutdown.clone()));
            app::serve(engine, addr, shutdown)
                .await
                .with_context(|| format!("HTTP server on {} failed", addr))?;
        }
        Command::Lookup { cep } => match engine.run(&cep).await {
            Ok(result) => {
                println!("{}", serde_json::to_string(&result)?);
            }
            Err(outcome) => {
                eprintln!("❌ {}", outcome.message());
                let exit_code = match outcome {
                    FailureOutcome::InvalidInput => 1,
                    FailureOutcome::LocationNotFound => 2,
                    FailureOutcome::UpstreamFailure => 3,
                };
                std::process::exit(exit_code);
            }
        },
    }

    Ok(())
}
