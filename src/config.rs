use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize, Clone)]
pub struct Config {
    pub ingestion: IngestionConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Settings for the batch build job.
#[derive(Deserialize, Clone)]
pub struct IngestionConfig {
    /// Path to the SQLite file holding the collaboration source tables.
    /// Attached as schema `src` for the duration of a build; may equal the
    /// graph database path, in which case no attach happens.
    pub source_db: String,
    /// SELECT yielding the collaboration pair stream. Must expose the first
    /// author as column `A` and the second author as column `B`, and must
    /// contain both orientations of every collaboration (a symmetric
    /// self-join does). No trailing semicolon, no LIMIT/OFFSET: the build
    /// job wraps the query with its own ordering and paging.
    pub pairs_query: String,
    /// Rows fetched per page by the paginated cursor.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Rows buffered per multi-row INSERT by the batch writer.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

#[derive(Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_page_size() -> usize {
    1000
}

fn default_buffer_size() -> usize {
    500
}

fn default_port() -> u16 {
    8899
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    load_config_from("config.json")
}

pub fn load_config_from<P: AsRef<Path>>(
    path: P,
) -> Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(Into::into)
}
