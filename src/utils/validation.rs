use crate::utils::error::{Result, ServiceError};
use std::net::SocketAddr;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ServiceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ServiceError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ServiceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Checks that every placeholder appears in the template and that the
/// template is a valid http(s) URL once the placeholders are filled in.
pub fn validate_url_template(field_name: &str, template: &str, placeholders: &[&str]) -> Result<()> {
    let mut sample = template.to_string();
    for name in placeholders {
        let placeholder = format!("{{{}}}", name);
        if !template.contains(&placeholder) {
            return Err(ServiceError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: template.to_string(),
                reason: format!("Template must contain the {} placeholder", placeholder),
            });
        }
        sample = sample.replace(&placeholder, "x");
    }

    validate_url(field_name, &sample).map_err(|_| ServiceError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: template.to_string(),
        reason: "Template does not expand to a valid http(s) URL".to_string(),
    })
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(ServiceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_socket_addr(field_name: &str, value: &str) -> Result<SocketAddr> {
    value
        .parse::<SocketAddr>()
        .map_err(|e| ServiceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Not a socket address: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("location.url_template", "https://example.com").is_ok());
        assert!(validate_url("location.url_template", "http://example.com").is_ok());
        assert!(validate_url("location.url_template", "").is_err());
        assert!(validate_url("location.url_template", "invalid-url").is_err());
        assert!(validate_url("location.url_template", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_url_template() {
        assert!(validate_url_template(
            "location.url_template",
            "https://viacep.com.br/ws/{cep}/json/",
            &["cep"]
        )
        .is_ok());
        assert!(validate_url_template(
            "weather.url_template",
            "http://api.weatherapi.com/v1/current.json?key={key}&q={city}",
            &["key", "city"]
        )
        .is_ok());

        let missing = validate_url_template(
            "weather.url_template",
            "http://api.weatherapi.com/v1/current.json?q={city}",
            &["key", "city"],
        );
        assert!(matches!(
            missing,
            Err(ServiceError::InvalidConfigValueError { ref reason, .. }) if reason.contains("{key}")
        ));

        assert!(validate_url_template("location.url_template", "viacep/{cep}", &["cep"]).is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("http.request_timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("http.request_timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_socket_addr() {
        assert!(validate_socket_addr("server.bind_address", "0.0.0.0:8080").is_ok());
        assert!(validate_socket_addr("server.bind_address", "localhost").is_err());
    }
}
