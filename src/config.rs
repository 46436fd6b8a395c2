use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the film catalog CSV
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Terms excluded from the title vocabulary (comma-separated in the environment)
    #[serde(default = "default_stopwords")]
    pub stopwords: Vec<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_catalog_path() -> String {
    "data/movies.csv".to_string()
}

fn default_stopwords() -> Vec<String> {
    ["the", "and", "in", "of"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server listens on
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
