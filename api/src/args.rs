use std::{net::IpAddr, time::Duration};

use clap::Parser;
use foodwaste_core::domain::common::{
    DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL, FoodWasteConfig, LLMConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "foodwaste-api", version, about = "Food Waste Reducer HTTP API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix applied to every route, e.g. `/food`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    /// Comma separated CORS origins. Empty allows any origin.
    #[arg(long = "allowed-origins", env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LlmArgs {
    #[arg(long = "openai-api-key", env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long = "llm-model", env = "LLM_MODEL", default_value = DEFAULT_LLM_MODEL)]
    pub model: String,

    #[arg(long = "llm-base-url", env = "LLM_BASE_URL", default_value = DEFAULT_LLM_BASE_URL)]
    pub base_url: String,

    /// Upper bound for a single inference call, in seconds.
    #[arg(long = "llm-timeout-secs", env = "LLM_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence.
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for FoodWasteConfig {
    fn from(args: Args) -> Self {
        FoodWasteConfig {
            llm: LLMConfig {
                api_key: args.llm.openai_api_key,
                model: args.llm.model,
                base_url: args.llm.base_url,
                request_timeout: Duration::from_secs(args.llm.timeout_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["foodwaste-api"]).unwrap();

        assert_eq!(args.server.port, 3333);
        assert_eq!(args.server.root_path, "");
        assert_eq!(args.llm.model, DEFAULT_LLM_MODEL);
        assert_eq!(args.llm.timeout_secs, 60);
        assert!(!args.log.json);
    }

    #[test]
    fn test_args_into_config() {
        let args = Args::try_parse_from([
            "foodwaste-api",
            "--openai-api-key",
            "sk-test",
            "--llm-model",
            "gpt-4o",
            "--llm-timeout-secs",
            "15",
            "--allowed-origins",
            "http://localhost:5173,https://example.com",
        ])
        .unwrap();

        assert_eq!(args.server.allowed_origins.len(), 2);

        let config = FoodWasteConfig::from(args);
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.request_timeout, Duration::from_secs(15));
    }
}
