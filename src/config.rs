use crate::error::{Result, TimelineError};
use photo_timeline_common::pagination::DEFAULT_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// サーバーURLを上書きする環境変数
pub const SERVER_ENV: &str = "PHOTO_TIMELINE_SERVER";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub default_limit: u32,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".into(),
            default_limit: DEFAULT_LIMIT,
            timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（ファイルがなければ既定値）
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TimelineError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("photo-timeline").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        if self.default_limit == 0 {
            return Err(TimelineError::Config("default_limit は1以上で指定してください".into()));
        }
        Ok(())
    }

    /// 接続先URL（環境変数を優先、末尾の `/` は除去）
    pub fn server_url(&self) -> String {
        self.resolve_server(std::env::var(SERVER_ENV).ok())
    }

    pub fn resolve_server(&self, env_value: Option<String>) -> String {
        let url = env_value
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.server_url.clone());
        url.trim().trim_end_matches('/').to_string()
    }

    pub fn set_server(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(TimelineError::Config(format!(
                "サーバーURLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.server_url = url.to_string();
        Ok(())
    }
}
