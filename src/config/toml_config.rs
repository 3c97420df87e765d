use crate::adapters::ApiKey;
use crate::config::ServiceConfig;
use crate::utils::error::{Result, ServiceError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional config file. Every key may be omitted; omitted keys keep the
/// value from the layer below.
///
/// ```toml
/// [server]
/// bind_address = "0.0.0.0:8080"
///
/// [location]
/// url_template = "https://viacep.com.br/ws/{cep}/json/"
///
/// [weather]
/// url_template = "http://api.weatherapi.com/v1/current.json?key={key}&q={city}&lang=pt"
/// api_key = "${WEATHER_API_KEY}"
///
/// [http]
/// request_timeout_seconds = 10
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub location: Option<LocationSection>,
    pub weather: Option<WeatherSection>,
    pub http: Option<HttpSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSection {
    pub url_template: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSection {
    pub url_template: Option<String>,
    pub api_key: Option<ApiKey>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSection {
    pub request_timeout_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ServiceError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ServiceError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${WEATHER_API_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ServiceError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 將檔案中有設定的值覆蓋到既有配置上
    pub fn apply_to(&self, config: &mut ServiceConfig) {
        if let Some(bind) = self.server.as_ref().and_then(|s| s.bind_address.clone()) {
            config.bind_address = bind;
        }
        if let Some(template) = self.location.as_ref().and_then(|l| l.url_template.clone()) {
            config.location_url_template = template;
        }
        if let Some(weather) = &self.weather {
            if let Some(template) = &weather.url_template {
                config.weather_url_template = template.clone();
            }
            if let Some(key) = &weather.api_key {
                config.weather_api_key = key.clone();
            }
        }
        if let Some(timeout) = self.http.as_ref().and_then(|h| h.request_timeout_seconds) {
            config.request_timeout_seconds = timeout;
        }
    }
}
