use crate::utils::error::{CrewError, Result};
use crate::utils::validation::{self, Validate};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "lifestyle-crew.toml";

lazy_static! {
    static ref ENV_VAR_RE: Regex = Regex::new(r"\$\{([^}]+)\}").unwrap();
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmSettings,
    pub secrets: SecretsConfig,
    pub crew: CrewSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8501".to_string(),
        }
    }
}

/// LLM 連線設定，預設為 Groq 的 OpenAI 相容端點
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "groq/llama-3.3-70b-versatile".to_string(),
            temperature: 0.3,
            max_tokens: None,
            timeout_seconds: 60,
            max_retries: 2,
            retry_delay_ms: 1000,
        }
    }
}

impl LlmSettings {
    /// 去掉 `groq/` 這類供應商前綴後的模型名稱
    pub fn model_id(&self) -> &str {
        self.model.strip_prefix("groq/").unwrap_or(&self.model)
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretsConfig {
    pub path: String,
    pub api_key_name: String,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            path: ".secrets.toml".to_string(),
            api_key_name: "GROQ_API_KEY".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrewSettings {
    /// 後面的任務是否能看到前面任務的輸出
    pub share_context: bool,
}

impl Default for CrewSettings {
    fn default() -> Self {
        Self { share_context: true }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CrewError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CrewError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 有指定路徑就必須存在；沒指定時才嘗試預設檔名，找不到就用預設值
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                tracing::debug!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                Ok(Self::default())
            }
        }
    }

    /// 替換環境變數 (例如 ${GROQ_BASE_URL})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        let result = ENV_VAR_RE.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        result.into_owned()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.bind", &self.server.bind)?;
        validation::validate_url("llm.base_url", &self.llm.base_url)?;
        validation::validate_non_empty_string("llm.model", self.llm.model_id())?;
        validation::validate_range("llm.temperature", self.llm.temperature, 0.0, 2.0)?;
        validation::validate_positive_number("llm.timeout_seconds", self.llm.timeout_seconds, 1)?;
        if let Some(max_tokens) = self.llm.max_tokens {
            validation::validate_positive_number("llm.max_tokens", u64::from(max_tokens), 1)?;
        }
        validation::validate_non_empty_string("secrets.api_key_name", &self.secrets.api_key_name)?;
        Ok(())
    }
}
