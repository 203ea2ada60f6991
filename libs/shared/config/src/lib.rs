use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub default_daily_token_limit: i32,
    pub max_advance_booking_days: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| {
                    warn!("PORT not set, defaulting to 3000");
                    3000
                }),
            default_daily_token_limit: env::var("DEFAULT_DAILY_TOKEN_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| {
                    warn!("DEFAULT_DAILY_TOKEN_LIMIT not set, defaulting to 50");
                    50
                }),
            max_advance_booking_days: env::var("MAX_ADVANCE_BOOKING_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| {
                    warn!("MAX_ADVANCE_BOOKING_DAYS not set, defaulting to 30");
                    30
                }),
        };

        if !config.is_valid() {
            warn!("Configuration contains non-positive limits, check environment");
        }

        config
    }

    pub fn is_valid(&self) -> bool {
        self.default_daily_token_limit > 0 && self.max_advance_booking_days > 0
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            default_daily_token_limit: 50,
            max_advance_booking_days: 30,
        }
    }
}
