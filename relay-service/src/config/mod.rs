use crate::services::providers::gemini::{GeminiConfig, DEFAULT_MODEL, GEMINI_API_BASE};
use crate::services::PromptStyle;
use secrecy::Secret;
use service_core::config::{self as core_config, get_env, get_optional_env, split_list};
use service_core::error::AppError;
use service_core::middleware::cors::{CorsPolicy, DEFAULT_ALLOWED_ORIGINS};
use std::env;
use std::time::Duration;

/// Everything the relay needs, read once at start-up.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub gemini: GeminiSettings,
    pub prompt_style: PromptStyle,
    pub cors: CorsPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Test,
    Prod,
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "test" => Ok(Environment::Test),
            "prod" => Ok(Environment::Prod),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

impl GeminiSettings {
    pub fn provider_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let env_str = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let environment: Environment = env_str
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let is_prod = environment == Environment::Prod;

        let timeout_secs = get_optional_env("GEMINI_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!("GEMINI_TIMEOUT_SECS: {}", e))
                })
            })
            .transpose()?;

        let prompt_style = get_env("PROMPT_STYLE", Some("rich"), is_prod)?
            .parse::<PromptStyle>()
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let cors = parse_cors_policy(
            &get_env("CORS_MODE", Some("wildcard"), is_prod)?,
            get_optional_env("CORS_ALLOWED_ORIGINS").as_deref(),
        )?;

        Ok(RelayConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("relay-service"), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            otlp_endpoint: get_optional_env("OTLP_ENDPOINT"),
            gemini: GeminiSettings {
                api_key: Secret::new(get_env("GEMINI_API_KEY", None, is_prod)?),
                model: get_env("GEMINI_MODEL", Some(DEFAULT_MODEL), is_prod)?,
                base_url: get_env("GEMINI_API_BASE", Some(GEMINI_API_BASE), is_prod)?,
                timeout_secs,
            },
            prompt_style,
            cors,
        })
    }
}

/// Build the CORS policy from `CORS_MODE` and an optional origin list.
pub fn parse_cors_policy(mode: &str, origins: Option<&str>) -> Result<CorsPolicy, AppError> {
    match mode.trim().to_lowercase().as_str() {
        "wildcard" | "*" => Ok(CorsPolicy::Wildcard),
        "allowlist" => {
            let allowed = match origins {
                Some(raw) => split_list(raw),
                None => DEFAULT_ALLOWED_ORIGINS
                    .iter()
                    .map(|o| o.to_string())
                    .collect(),
            };
            if allowed.is_empty() {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "CORS_ALLOWED_ORIGINS must list at least one origin"
                )));
            }
            Ok(CorsPolicy::AllowList(allowed))
        }
        other => Err(AppError::ConfigError(anyhow::anyhow!(
            "Invalid CORS_MODE '{}': expected wildcard or allowlist",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_mode() {
        assert_eq!(
            parse_cors_policy("wildcard", Some("http://ignored")).unwrap(),
            CorsPolicy::Wildcard
        );
    }

    #[test]
    fn allowlist_defaults_to_local_dev_origins() {
        assert_eq!(
            parse_cors_policy("allowlist", None).unwrap(),
            CorsPolicy::default_allow_list()
        );
    }

    #[test]
    fn allowlist_reads_custom_origins() {
        let policy =
            parse_cors_policy("AllowList", Some("https://chat.example.com, http://localhost:3000"))
                .unwrap();
        assert_eq!(
            policy,
            CorsPolicy::AllowList(vec![
                "https://chat.example.com".to_string(),
                "http://localhost:3000".to_string(),
            ])
        );
    }

    #[test]
    fn allowlist_rejects_empty_list() {
        assert!(matches!(
            parse_cors_policy("allowlist", Some(" , ")),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(matches!(
            parse_cors_policy("open", None),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn environment_parses() {
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Prod);
        assert_eq!("test".parse::<Environment>().unwrap(), Environment::Test);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn provider_config_converts_timeout() {
        let settings = GeminiSettings {
            api_key: Secret::new("k".to_string()),
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_API_BASE.to_string(),
            timeout_secs: Some(30),
        };
        assert_eq!(
            settings.provider_config().timeout,
            Some(Duration::from_secs(30))
        );
    }
}
