use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    /// PostgreSQL connection string. When absent the in-memory store is used.
    pub database_url: Option<String>,
    pub seed_demo_data: bool,
    pub seed_password: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
            jwt_secret: "dev-secret-change-in-production".to_string(),
            jwt_expiry_hours: 24,
            database_url: None,
            seed_demo_data: true,
            seed_password: "bragboard".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: env::var("PORT")
                .or_else(|_| env::var("SERVER_PORT"))
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(defaults.server_port),
            jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .ok()
                .and_then(|hours| hours.parse().ok())
                .filter(|hours: &i64| *hours > 0)
                .unwrap_or(defaults.jwt_expiry_hours),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .map(|value| parse_flag(&value))
                .unwrap_or(defaults.seed_demo_data),
            seed_password: env::var("SEED_PASSWORD").unwrap_or(defaults.seed_password),
        }
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(value.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off")
}
