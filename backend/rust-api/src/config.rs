use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub questions: QuestionsConfig,
    pub auth: AuthConfig,
    pub demo_user: DemoUserConfig,
    pub telemetry: TelemetryConfig,
    /// `username:password` expected by the /metrics Basic Auth guard
    pub metrics_auth: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// JSON fixture overriding the embedded question set
    pub fixture_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionsConfig {
    pub default_random_limit: usize,
    pub max_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DemoUserConfig {
    pub enabled: bool,
    pub seed_file: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelemetryConfig {
    pub otlp_endpoint: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8081,
            },
            catalog: CatalogConfig::default(),
            questions: QuestionsConfig {
                default_random_limit: 10,
                max_limit: 500,
            },
            auth: AuthConfig {
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
            demo_user: DemoUserConfig {
                enabled: true,
                seed_file: None,
            },
            telemetry: TelemetryConfig::default(),
            metrics_auth: "admin:changeme".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            // Override with environment variables (prefix: APP_)
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let defaults = Config::default();

        let host = settings
            .get_string("server.host")
            .unwrap_or(defaults.server.host);

        let port = settings
            .get_int("server.port")
            .ok()
            .or_else(|| env::var("PORT").ok().and_then(|v| v.parse().ok()))
            .map(|p| {
                u16::try_from(p).map_err(|_| {
                    config::ConfigError::Message(format!("server.port {} is out of range", p))
                })
            })
            .transpose()?
            .unwrap_or(defaults.server.port);

        let fixture_path = settings
            .get_string("catalog.fixture_path")
            .ok()
            .or_else(|| env::var("QUESTION_FIXTURE").ok());

        let default_random_limit = settings
            .get_int("questions.default_random_limit")
            .ok()
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(defaults.questions.default_random_limit);

        let max_limit = settings
            .get_int("questions.max_limit")
            .ok()
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(defaults.questions.max_limit);

        let bcrypt_cost = settings
            .get_int("auth.bcrypt_cost")
            .ok()
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(defaults.auth.bcrypt_cost);

        let demo_enabled = settings
            .get_bool("demo_user.enabled")
            .unwrap_or(defaults.demo_user.enabled);

        let demo_seed_file = settings
            .get_string("demo_user.seed_file")
            .ok()
            .or_else(|| env::var("DEMO_USER_SEED_FILE").ok());

        let otlp_endpoint = settings
            .get_string("telemetry.otlp_endpoint")
            .ok()
            .or_else(|| env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok());

        let metrics_auth = settings
            .get_string("metrics.auth")
            .or_else(|_| env::var("METRICS_AUTH"))
            .unwrap_or_else(|_| {
                if env == "prod" {
                    eprintln!("WARNING: METRICS_AUTH not set, using default credentials");
                }
                defaults.metrics_auth
            });

        Ok(Config {
            server: ServerConfig { host, port },
            catalog: CatalogConfig { fixture_path },
            questions: QuestionsConfig {
                default_random_limit,
                max_limit,
            },
            auth: AuthConfig { bcrypt_cost },
            demo_user: DemoUserConfig {
                enabled: demo_enabled,
                seed_file: demo_seed_file,
            },
            telemetry: TelemetryConfig { otlp_endpoint },
            metrics_auth,
        })
    }
}
