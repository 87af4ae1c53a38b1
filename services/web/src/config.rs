/// Web service configuration loaded from environment variables.
#[derive(Debug)]
pub struct WebConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port to listen on (default 3000). Env var: `WEB_PORT`.
    pub web_port: u16,
    /// Auxiliary API key stamped onto authenticated sessions at login.
    /// Env var: `API_KEY` (empty when unset).
    pub api_key: String,
}

impl WebConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            web_port: std::env::var("WEB_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            api_key: std::env::var("API_KEY").unwrap_or_default(),
        }
    }
}
