use crate::domain::model::ApiKey;
use crate::utils::error::{CrewError, Result};
use std::collections::HashMap;
use std::path::Path;

/// 啟動時讀取一次的密鑰來源：先看 secrets 檔，再看環境變數
#[derive(Debug, Clone, Default)]
pub struct SecretStore {
    values: HashMap<String, String>,
}

impl SecretStore {
    /// 檔案不存在時回傳空的 store，只靠環境變數
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("Secrets file {} not found, falling back to environment", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content).map_err(|e| CrewError::ConfigValidationError {
            field: "secrets".to_string(),
            message: format!("Secrets TOML parsing error: {}", e),
        })?;

        // 只收頂層字串值
        let values = table
            .into_iter()
            .filter_map(|(key, value)| match value {
                toml::Value::String(s) => Some((key, s)),
                _ => None,
            })
            .collect();

        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// 空白值視為未設定
    pub fn resolve_api_key(&self, name: &str) -> Option<ApiKey> {
        let from_file = self
            .get(name)
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string);

        from_file
            .or_else(|| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
            .map(ApiKey::new)
    }
}
