use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub round_duration_seconds: u32,
    pub suggestion_debounce_ms: u64,
    pub suggestion_limit: usize,
    pub tick_interval_ms: u64,
}

impl Config {
    pub fn new() -> Self {
        Self {
            round_duration_seconds: env::var("ROUND_DURATION_SECONDS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .expect("Invalid ROUND_DURATION_SECONDS"),
            suggestion_debounce_ms: env::var("SUGGESTION_DEBOUNCE_MS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .expect("Invalid SUGGESTION_DEBOUNCE_MS"),
            suggestion_limit: env::var("SUGGESTION_LIMIT")
                .unwrap_or_else(|_| "8".to_string())
                .parse()
                .expect("Invalid SUGGESTION_LIMIT"),
            tick_interval_ms: env::var("TICK_INTERVAL_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .expect("Invalid TICK_INTERVAL_MS"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
