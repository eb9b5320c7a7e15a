use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// LLM 服務的金鑰；Debug/Display 一律遮蔽
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// 代理人角色設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

/// 綁定到單一代理人的任務
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub name: String,
    pub description: String,
    pub expected_output: String,
    pub agent: AgentProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

/// 已套用輸入值的 prompt，dry-run 時直接顯示
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPrompt {
    pub task: String,
    pub agent_role: String,
    pub system: String,
    pub user: String,
}

impl RenderedPrompt {
    pub fn into_messages(self) -> Vec<ChatMessage> {
        vec![ChatMessage::system(self.system), ChatMessage::user(self.user)]
    }
}

/// 單一任務的執行結果
#[derive(Debug, Clone)]
pub struct TaskOutput {
    pub name: String,
    pub agent_role: String,
    pub raw: String,
    pub duration: Duration,
}

/// 整個 crew 的執行結果，依執行順序排列
#[derive(Debug, Clone)]
pub struct CrewOutput {
    pub execution_id: String,
    pub tasks_output: Vec<TaskOutput>,
}

impl CrewOutput {
    pub fn get(&self, task_name: &str) -> Option<&TaskOutput> {
        self.tasks_output.iter().find(|t| t.name == task_name)
    }

    /// 執行摘要
    pub fn summary(&self) -> HashMap<String, serde_json::Value> {
        let mut summary = HashMap::new();

        let total_chars: usize = self.tasks_output.iter().map(|t| t.raw.chars().count()).sum();
        let total_duration: Duration = self.tasks_output.iter().map(|t| t.duration).sum();

        summary.insert(
            "execution_id".to_string(),
            serde_json::Value::String(self.execution_id.clone()),
        );
        summary.insert(
            "total_tasks".to_string(),
            serde_json::Value::Number(self.tasks_output.len().into()),
        );
        summary.insert(
            "total_characters".to_string(),
            serde_json::Value::Number(total_chars.into()),
        );
        summary.insert(
            "total_duration_ms".to_string(),
            serde_json::Value::Number((total_duration.as_millis() as u64).into()),
        );

        let names: Vec<serde_json::Value> = self
            .tasks_output
            .iter()
            .map(|t| serde_json::Value::String(t.name.clone()))
            .collect();
        summary.insert("executed_tasks".to_string(), serde_json::Value::Array(names));

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(name: &str, raw: &str, ms: u64) -> TaskOutput {
        TaskOutput {
            name: name.to_string(),
            agent_role: format!("{} agent", name),
            raw: raw.to_string(),
            duration: Duration::from_millis(ms),
        }
    }

    #[test]
    fn test_api_key_is_redacted() {
        let key = ApiKey::new("gsk_secret");
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
        assert_eq!(key.to_string(), "***");
        assert_eq!(key.expose(), "gsk_secret");
    }

    #[test]
    fn test_chat_role_serializes_lowercase() {
        let json = serde_json::to_value(ChatMessage::system("hi")).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "hi");
    }

    #[test]
    fn test_crew_output_lookup_and_summary() {
        let crew_output = CrewOutput {
            execution_id: "crew_test".to_string(),
            tasks_output: vec![output("essentials", "abc", 100), output("tips", "de", 200)],
        };

        assert_eq!(crew_output.get("tips").unwrap().raw, "de");
        assert!(crew_output.get("gadgets").is_none());

        let summary = crew_output.summary();
        assert_eq!(summary.get("total_tasks").unwrap(), &serde_json::Value::Number(2.into()));
        assert_eq!(summary.get("total_characters").unwrap(), &serde_json::Value::Number(5.into()));
        assert_eq!(summary.get("total_duration_ms").unwrap(), &serde_json::Value::Number(300.into()));

        let executed = summary.get("executed_tasks").unwrap().as_array().unwrap();
        assert_eq!(executed[0], "essentials");
        assert_eq!(executed[1], "tips");
    }
}
