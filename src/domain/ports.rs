use crate::domain::model::ChatRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 語言模型補全服務
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<String>;

    /// 實際送出的模型名稱
    fn model(&self) -> &str;
}
