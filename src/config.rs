use anyhow::Result;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::path::PathBuf;

/// Process configuration, read once at startup and handed to each component.
///
/// Keys map one-to-one onto environment variables (`MYSQL_HOST` -> `mysql_host`).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub http_bind: String,
    pub http_port: u16,

    /// Credential shared by the transcription and summarization services
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub transcription_model: String,
    pub summary_model: String,
    pub summary_max_tokens: u32,
    pub summary_temperature: f32,

    pub mysql_host: String,
    pub mysql_port: u16,
    pub mysql_user: String,
    pub mysql_password: String,
    pub mysql_db: String,

    /// Where raw uploads are written
    pub storage_dir: PathBuf,
}

impl Config {
    /// Load from an optional config file, then the process environment.
    pub fn load(path: &str) -> Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::default());

        Self::from_builder(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings = builder
            .set_default("http_bind", "0.0.0.0")?
            .set_default("http_port", 8000_i64)?
            .set_default("openai_base_url", "https://api.openai.com/v1")?
            .set_default("transcription_model", "whisper-1")?
            .set_default("summary_model", "gpt-4o-mini")?
            .set_default("summary_max_tokens", 400_i64)?
            .set_default("summary_temperature", 0.4_f64)?
            .set_default("mysql_host", "localhost")?
            .set_default("mysql_port", 3306_i64)?
            .set_default("mysql_user", "root")?
            .set_default("mysql_password", "")?
            .set_default("mysql_db", "meeting_summarizer")?
            .set_default("storage_dir", "uploads")?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// The AI credential, treating an empty value as unset.
    pub fn api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .filter(|key| !key.is_empty())
    }
}
