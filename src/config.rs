use crate::engine::game::{DEFAULT_MOVE_LIMIT, GameOptions};

/// Server configuration parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server listen port.
    pub port: u16,
    /// Server bind host.
    pub host: String,
    /// Fullmove number at which games are drawn (0 disables the cap).
    pub move_limit: u16,
    /// Length of generated room codes.
    pub code_length: usize,
    /// CORS origins; empty allows any origin.
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        let defaults = AppConfig::default();
        AppConfig {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            host: std::env::var("HOST").unwrap_or(defaults.host),
            move_limit: std::env::var("CHESS_MOVE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.move_limit),
            code_length: std::env::var("CHESS_CODE_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.code_length),
            allowed_origins: std::env::var("CHESS_ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
        }
    }

    /// Socket address string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Options every new game is created with.
    pub fn game_options(&self) -> GameOptions {
        GameOptions {
            move_limit: self.move_limit,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: 8000,
            host: "0.0.0.0".to_string(),
            move_limit: DEFAULT_MOVE_LIMIT,
            code_length: 6,
            allowed_origins: Vec::new(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
