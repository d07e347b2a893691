use std::env;
use chrono_tz::Tz;

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub backend_url: String,
    pub backend_token: String,
    pub timezone: String,
    pub backend_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            backend_url: env::var("BACKEND_URL").expect("BACKEND_URL must be set"),
            backend_token: env::var("BACKEND_TOKEN").unwrap_or_default(),
            timezone: env::var("TIMEZONE").unwrap_or_else(|_| "America/Sao_Paulo".to_string()),
            backend_timeout_secs: env::var("BACKEND_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("BACKEND_TIMEOUT_SECS must be a number"),
        }
    }

    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or(chrono_tz::UTC)
    }
}
