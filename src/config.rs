use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub backends: BackendConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// Google Cloud API key shared by the generative and translation APIs.
    pub google_api_key: Option<String>,
    /// Generative models in fallback priority order.
    #[serde(default = "default_gemini_models")]
    pub gemini_models: Vec<GeminiModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiModel {
    pub model: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

fn default_api_version() -> String {
    "v1beta".to_string()
}

fn default_gemini_models() -> Vec<GeminiModel> {
    ["gemini-2.0-flash", "gemini-2.5-flash", "gemini-2.0-flash-lite"]
        .into_iter()
        .map(|model| GeminiModel {
            model: model.to_string(),
            api_version: default_api_version(),
        })
        .collect()
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
