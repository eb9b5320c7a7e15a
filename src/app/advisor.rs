use crate::config::{CrewSettings, LlmSettings};
use crate::core::crew::Crew;
use crate::core::roster::{self, Recommendations, LIFESTYLE_INPUT};
use crate::domain::model::{ApiKey, RenderedPrompt};
use crate::domain::ports::LlmClient;
use crate::utils::error::Result;
use crate::utils::validation::{ensure_api_key, ensure_lifestyle};
use std::collections::HashMap;
use std::sync::Arc;

/// 一次表單送出的完整流程：前置檢查 → crew → 四個分頁
pub struct LifestyleAdvisor {
    llm: Arc<dyn LlmClient>,
    api_key: Option<ApiKey>,
    api_key_name: String,
    llm_settings: LlmSettings,
    crew_settings: CrewSettings,
}

impl LifestyleAdvisor {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        api_key: Option<ApiKey>,
        api_key_name: impl Into<String>,
        llm_settings: LlmSettings,
        crew_settings: CrewSettings,
    ) -> Self {
        Self {
            llm,
            api_key,
            api_key_name: api_key_name.into(),
            llm_settings,
            crew_settings,
        }
    }

    pub fn api_key_configured(&self) -> bool {
        ensure_api_key(&self.api_key_name, self.api_key.as_ref()).is_ok()
    }

    pub fn api_key_name(&self) -> &str {
        &self.api_key_name
    }

    pub fn model(&self) -> &str {
        self.llm.model()
    }

    /// 先檢查金鑰再檢查輸入，兩者都通過才會呼叫模型
    pub async fn recommend(&self, lifestyle: &str) -> Result<Recommendations> {
        ensure_api_key(&self.api_key_name, self.api_key.as_ref())?;
        let lifestyle = ensure_lifestyle(lifestyle)?;

        tracing::info!("🔍 Our specialists are analysing the profile '{}'", lifestyle);

        let crew = self.build_crew();
        let output = crew.kickoff(&Self::inputs(lifestyle)).await?;

        tracing::debug!("📊 Crew summary: {:?}", output.summary());
        Recommendations::from_crew_output(lifestyle, &output)
    }

    /// dry-run：只渲染 prompt，不需要金鑰也不呼叫模型
    pub fn preview(&self, lifestyle: &str) -> Result<Vec<RenderedPrompt>> {
        let lifestyle = ensure_lifestyle(lifestyle)?;
        self.build_crew().render_all(&Self::inputs(lifestyle))
    }

    fn build_crew(&self) -> Crew {
        let crew = Crew::new(self.llm.clone(), self.llm_settings.temperature)
            .with_max_tokens(self.llm_settings.max_tokens)
            .with_shared_context(self.crew_settings.share_context);
        roster::assemble(crew)
    }

    fn inputs(lifestyle: &str) -> HashMap<String, String> {
        HashMap::from([(LIFESTYLE_INPUT.to_string(), lifestyle.to_string())])
    }
}
