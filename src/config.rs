use crate::error::{FfeError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// APIキーを探す環境変数（先頭優先）
const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    /// 0 でタイムアウトなし
    pub timeout_seconds: u64,
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            temperature: ffe_inventory_common::prompts::DEFAULT_TEMPERATURE,
            timeout_seconds: 120,
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FfeError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("ffe-inventory").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        let from_env = API_KEY_ENV_VARS.iter().filter_map(|name| std::env::var(name).ok());
        resolve_api_key(from_env, self.api_key.as_deref()).ok_or(FfeError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }
}

/// 環境変数を優先し、空白だけのキーは未設定とみなす
fn resolve_api_key(
    from_env: impl IntoIterator<Item = String>,
    stored: Option<&str>,
) -> Option<String> {
    from_env
        .into_iter()
        .chain(stored.map(str::to_string))
        .find(|key| !key.trim().is_empty())
}
