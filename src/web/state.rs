use crate::adapters::OpenAiCompatibleClient;
use crate::app::LifestyleAdvisor;
use crate::config::{AppConfig, SecretStore};
use crate::domain::ports::LlmClient;
use crate::utils::error::Result;
use std::sync::Arc;

/// 啟動時建立一次，之後只讀
pub struct AppState {
    pub advisor: LifestyleAdvisor,
}

impl AppState {
    pub fn new(advisor: LifestyleAdvisor) -> Self {
        Self { advisor }
    }

    /// 讀取密鑰並建立真正的 LLM 客戶端
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let secrets = SecretStore::load(&config.secrets.path)?;
        let api_key = secrets.resolve_api_key(&config.secrets.api_key_name);

        if api_key.is_none() {
            tracing::warn!(
                "⚠️ {} is not configured; the form will refuse to run",
                config.secrets.api_key_name
            );
        }

        let client = OpenAiCompatibleClient::new(&config.llm, api_key.clone())?;
        tracing::info!("🤖 Model {} via {}", client.model(), client.endpoint());
        let llm: Arc<dyn LlmClient> = Arc::new(client);

        Ok(Self::new(LifestyleAdvisor::new(
            llm,
            api_key,
            config.secrets.api_key_name.clone(),
            config.llm.clone(),
            config.crew.clone(),
        )))
    }
}
