use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    /// PEM file with the RS256 private key. Optional: a deployment that
    /// only verifies tokens runs without one.
    pub private_key_path: Option<String>,
    pub public_key_path: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub token: TokenConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let token = TokenConfig {
            private_key_path: std::env::var("TOKEN_PRIVATE_KEY_PATH").ok(),
            public_key_path: std::env::var("TOKEN_PUBLIC_KEY_PATH")
                .unwrap_or_else(|_| "./public.pem".into()),
            ttl_hours: std::env::var("TOKEN_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(24),
        };
        Ok(Self {
            database_url,
            token,
        })
    }
}
