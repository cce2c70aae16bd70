use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppSettings {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub openai: OpenAiConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub name: String,
    pub environment: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

/// Settings for the hosted content provider. The API key is deliberately
/// absent: callers supply their own credential with each request and it is
/// never held in configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub image_size: String,
}

pub(crate) fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

impl AppSettings {
    pub fn from_env() -> Result<Self, AppError> {
        // App config
        let app_name = env::var("APP_NAME").unwrap_or_else(|_| "promocast".to_string());
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        // Server config
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| AppError::Configuration("SERVER_PORT must be a valid port number".to_string()))?;

        // CORS origins
        let cors_origins = parse_cors_origins(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        // Content provider config
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let text_model = env::var("OPENAI_TEXT_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());
        let image_model = env::var("OPENAI_IMAGE_MODEL").unwrap_or_else(|_| "dall-e-3".to_string());
        let image_size = env::var("OPENAI_IMAGE_SIZE").unwrap_or_else(|_| "1024x1024".to_string());

        Ok(Self {
            app: AppConfig {
                name: app_name,
                environment,
            },
            server: ServerConfig {
                host: server_host,
                port: server_port,
                cors_origins,
            },
            openai: OpenAiConfig {
                base_url: openai_base_url,
                text_model,
                image_model,
                image_size,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_origins_split_and_trimmed() {
        let origins = parse_cors_origins("https://a.example, https://b.example ,*");
        assert_eq!(
            origins,
            vec![
                "https://a.example".to_string(),
                "https://b.example".to_string(),
                "*".to_string()
            ]
        );
    }

    #[test]
    fn test_single_wildcard_origin() {
        assert_eq!(parse_cors_origins("*"), vec!["*".to_string()]);
    }
}
