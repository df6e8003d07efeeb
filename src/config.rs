use once_cell::sync::Lazy;
use serde::Deserialize;

fn default_base_url() -> String {
    "https://earthengine.googleapis.com/v1".to_string()
}

#[derive(Debug, Deserialize)]
pub struct EarthEngineConfig {
    pub project: String,
    pub token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

pub static CONFIG: Lazy<EarthEngineConfig> = Lazy::new(|| {
    envy::prefixed("UHI_EE_")
        .from_env::<EarthEngineConfig>()
        .expect("Missing Earth Engine config. Required env vars: UHI_EE_PROJECT, UHI_EE_TOKEN")
});

pub fn config() -> &'static EarthEngineConfig {
    &CONFIG
}
