/// Runtime configuration read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub env: String,
}

pub const DEFAULT_PORT: u16 = 3000;

impl Config {
    /// Reads configuration from the process environment. When `APP_ENV` is
    /// not set, a local `.env` file is loaded first so development setups
    /// work without exporting anything.
    pub fn from_env() -> Self {
        if std::env::var("APP_ENV").is_err() {
            tracing::info!("APP_ENV not defined, checking .env file");
            dotenv::dotenv().ok();
        }

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self { port, env }
    }
}
