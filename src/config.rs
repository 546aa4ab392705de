use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Cookie signing key; sessions do not survive restarts without it.
    pub session_key: Option<String>,
    pub page_size: u32,
    /// JSON snapshot to load instead of generating fixture data.
    pub fixture_path: Option<String>,
    pub fixture_people: usize,
    pub fixture_groups: usize,
    pub fixture_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            session_key: None,
            page_size: 25,
            fixture_path: None,
            fixture_people: 50,
            fixture_groups: 5,
            fixture_seed: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = AppConfig::default();

        Self {
            host: env::var("CONSOLE_HOST").unwrap_or(defaults.host),
            port: parsed("CONSOLE_PORT").unwrap_or(defaults.port),
            session_key: env::var("SESSION_KEY").ok(),
            page_size: parsed("PAGE_SIZE").filter(|n| *n > 0).unwrap_or(defaults.page_size),
            fixture_path: env::var("FIXTURE_PATH").ok().filter(|s| !s.is_empty()),
            fixture_people: parsed("FIXTURE_PEOPLE").unwrap_or(defaults.fixture_people),
            fixture_groups: parsed("FIXTURE_GROUPS").unwrap_or(defaults.fixture_groups),
            fixture_seed: parsed("FIXTURE_SEED"),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
