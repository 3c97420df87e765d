use crate::adapters::ApiKey;
use crate::config::toml_config::TomlConfig;
use crate::config::ServiceConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cep-weather")]
#[command(about = "Current temperature (°C, °F, K) for a Brazilian postal code")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "WEATHER_API_KEY", hide_env_values = true)]
    pub weather_api_key: Option<ApiKey>,

    #[arg(long, global = true)]
    pub location_url_template: Option<String>,

    #[arg(long, global = true)]
    pub weather_url_template: Option<String>,

    #[arg(long, global = true)]
    pub request_timeout_seconds: Option<u64>,

    #[arg(long, global = true, help = "Address the HTTP server listens on")]
    pub bind: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve GET /weather?cep=<CEP>
    Serve,
    /// Look up a single CEP and print the result as JSON
    Lookup {
        #[arg(allow_hyphen_values = true)]
        cep: String,
    },
}

impl CliConfig {
    /// 依序套用: 預設值 < TOML 檔案 < 命令列與環境變數
    pub fn service_config(&self) -> Result<ServiceConfig> {
        let mut config = ServiceConfig::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading config file: {}", path.display());
            TomlConfig::from_file(path)?.apply_to(&mut config);
        }

        if let Some(template) = &self.location_url_template {
            config.location_url_template = template.clone();
        }
        if let Some(template) = &self.weather_url_template {
            config.weather_url_template = template.clone();
        }
        if let Some(key) = &self.weather_api_key {
            config.weather_api_key = key.clone();
        }
        if let Some(timeout) = self.request_timeout_seconds {
            config.request_timeout_seconds = timeout;
        }
        if let Some(bind) = &self.bind {
            config.bind_address = bind.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_lookup_command() {
        let cli = CliConfig::try_parse_from([
            "cep-weather",
            "lookup",
            "01310100",
            "--request-timeout-seconds",
            "4",
        ])
        .unwrap();

        assert!(matches!(cli.command, Command::Lookup { ref cep } if cep == "01310100"));
        let config = cli.service_config().unwrap();
        assert_eq!(config.request_timeout_seconds, 4);
    }

    #[test]
    fn test_lookup_accepts_empty_cep() {
        let cli = CliConfig::try_parse_from(["cep-weather", "lookup", ""]).unwrap();
        assert!(matches!(cli.command, Command::Lookup { ref cep } if cep.is_empty()));
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                b"[server]\nbind_address = \"127.0.0.1:9000\"\n[http]\nrequest_timeout_seconds = 7\n",
            )
            .unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::try_parse_from([
            "cep-weather",
            "--config",
            path.as_str(),
            "--bind",
            "127.0.0.1:9100",
            "serve",
        ])
        .unwrap();
        let config = cli.service_config().unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:9100");
        assert_eq!(config.request_timeout_seconds, 7);
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let cli = CliConfig::try_parse_from([
            "cep-weather",
            "serve",
            "--location-url-template",
            "https://viacep.com.br/ws/json/",
        ])
        .unwrap();
        assert!(cli.service_config().is_err());
    }

    #[test]
    fn test_api_key_flag_is_redacted_in_debug() {
        let cli = CliConfig::try_parse_from([
            "cep-weather",
            "serve",
            "--weather-api-key",
            "very-secret",
        ])
        .unwrap();
        assert!(!format!("{:?}", cli).contains("very-secret"));
        assert_eq!(
            cli.service_config().unwrap().weather_api_key.expose(),
            "very-secret"
        );
    }
}
