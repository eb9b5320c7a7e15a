use crate::core::prompt;
use crate::domain::model::{ChatRequest, CrewOutput, RenderedPrompt, TaskOutput, TaskSpec};
use crate::domain::ports::LlmClient;
use crate::utils::error::{CrewError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// 依序執行任務的 crew：每個任務一次模型呼叫，前一個任務完成後才開始下一個
pub struct Crew {
    tasks: Vec<TaskSpec>,
    llm: Arc<dyn LlmClient>,
    temperature: f32,
    max_tokens: Option<u32>,
    share_context: bool,
    execution_id: String,
}

impl Crew {
    pub fn new(llm: Arc<dyn LlmClient>, temperature: f32) -> Self {
        Self {
            tasks: Vec::new(),
            llm,
            temperature,
            max_tokens: None,
            share_context: true,
            execution_id: format!("crew_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S")),
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// 關閉後每個任務只看得到自己的 prompt
    pub fn with_shared_context(mut self, enabled: bool) -> Self {
        self.share_context = enabled;
        self
    }

    pub fn with_execution_id(mut self, execution_id: String) -> Self {
        self.execution_id = execution_id;
        self
    }

    pub fn with_task(mut self, task: TaskSpec) -> Self {
        self.add_task(task);
        self
    }

    pub fn add_task(&mut self, task: TaskSpec) {
        self.tasks.push(task);
    }

    /// 不呼叫模型，只渲染每個任務的 prompt（不含前面任務的輸出）
    pub fn render_all(&self, inputs: &HashMap<String, String>) -> Result<Vec<RenderedPrompt>> {
        self.tasks
            .iter()
            .map(|task| prompt::render_task(task, inputs, &[]))
            .collect()
    }

    /// 執行所有任務；任何一個失敗就中止，已完成的輸出一併丟棄
    pub async fn kickoff(&self, inputs: &HashMap<String, String>) -> Result<CrewOutput> {
        if self.tasks.is_empty() {
            return Err(CrewError::ConfigError {
                message: "Crew has no tasks to run".to_string(),
            });
        }

        // 先檢查所有模板，避免跑到一半才發現缺輸入
        self.render_all(inputs)?;

        tracing::info!(
            "🎬 Crew {} starting {} tasks with model {}",
            self.execution_id,
            self.tasks.len(),
            self.llm.model()
        );

        let mut outputs: Vec<TaskOutput> = Vec::with_capacity(self.tasks.len());

        for task in &self.tasks {
            let start_time = Instant::now();

            match self.execute_task(task, inputs, &outputs).await {
                Ok(raw) => {
                    let output = TaskOutput {
                        name: task.name.clone(),
                        agent_role: task.agent.role.clone(),
                        raw,
                        duration: start_time.elapsed(),
                    };

                    tracing::info!(
                        "✅ Task finished: {} (chars: {}, duration: {:?})",
                        output.name,
                        output.raw.chars().count(),
                        output.duration
                    );

                    outputs.push(output);
                }
                Err(e) => {
                    tracing::error!("❌ Task {} failed: {}", task.name, e);
                    return Err(CrewError::TaskFailed {
                        task: task.name.clone(),
                        source: Box::new(e),
                    });
                }
            }
        }

        Ok(CrewOutput {
            execution_id: self.execution_id.clone(),
            tasks_output: outputs,
        })
    }

    async fn execute_task(
        &self,
        task: &TaskSpec,
        inputs: &HashMap<String, String>,
        previous: &[TaskOutput],
    ) -> Result<String> {
        let context = if self.share_context { previous } else { &[] };
        let rendered = prompt::render_task(task, inputs, context)?;
        tracing::debug!("📝 {} prompt: {} chars", task.name, rendered.user.len());

        let request = ChatRequest {
            messages: rendered.into_messages(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let completion = self.llm.complete(request).await?;
        let raw = completion.trim();
        if raw.is_empty() {
            return Err(CrewError::EmptyCompletion {
                task: task.name.clone(),
            });
        }

        Ok(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::AgentProfile;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 依呼叫順序回傳預設答案，並記錄收到的請求
    struct ScriptedLlm {
        replies: Mutex<Vec<Result<String>>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedLlm {
        fn new(replies: Vec<Result<String>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().rev().collect()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn complete(&self, request: ChatRequest) -> Result<String> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok("unscripted".to_string()))
        }

        fn model(&self) -> &str {
            "scripted"
        }
    }

    fn task(name: &str) -> TaskSpec {
        TaskSpec {
            name: name.to_string(),
            description: format!("{} for {{lifestyle}}", name),
            expected_output: "A list.".to_string(),
            agent: AgentProfile {
                role: format!("{} role", name),
                goal: "Help the {lifestyle}.".to_string(),
                backstory: "Seasoned.".to_string(),
            },
        }
    }

    fn inputs() -> HashMap<String, String> {
        HashMap::from([("lifestyle".to_string(), "Hiker".to_string())])
    }

    #[tokio::test]
    async fn test_kickoff_runs_tasks_in_order() {
        let llm = Arc::new(ScriptedLlm::new(vec![Ok("first".to_string()), Ok("  second \n".to_string())]));
        let crew = Crew::new(llm.clone(), 0.3)
            .with_execution_id("crew_test".to_string())
            .with_task(task("one"))
            .with_task(task("two"));

        let output = crew.kickoff(&inputs()).await.unwrap();

        assert_eq!(output.execution_id, "crew_test");
        assert_eq!(output.tasks_output.len(), 2);
        assert_eq!(output.tasks_output[0].name, "one");
        assert_eq!(output.tasks_output[0].raw, "first");
        assert_eq!(output.tasks_output[1].raw, "second");

        let requests = llm.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].temperature, 0.3);
        assert!(requests[0].messages[1].content.starts_with("one for Hiker"));
        assert!(requests[1].messages[1].content.contains("## one role\nfirst"));
    }

    #[tokio::test]
    async fn test_context_can_be_disabled() {
        let llm = Arc::new(ScriptedLlm::new(vec![Ok("first".to_string()), Ok("second".to_string())]));
        let crew = Crew::new(llm.clone(), 0.3)
            .with_shared_context(false)
            .with_task(task("one"))
            .with_task(task("two"));

        crew.kickoff(&inputs()).await.unwrap();

        let requests = llm.requests();
        assert!(!requests[1].messages[1].content.contains("first"));
    }

    #[tokio::test]
    async fn test_failure_stops_the_sequence() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            Ok("first".to_string()),
            Err(CrewError::LlmError {
                status: 500,
                message: "boom".to_string(),
            }),
            Ok("never".to_string()),
        ]));
        let crew = Crew::new(llm.clone(), 0.3)
            .with_task(task("one"))
            .with_task(task("two"))
            .with_task(task("three"));

        let err = crew.kickoff(&inputs()).await.unwrap_err();

        match err {
            CrewError::TaskFailed { task, source } => {
                assert_eq!(task, "two");
                assert!(matches!(*source, CrewError::LlmError { status: 500, .. }));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(llm.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_blank_completion_is_an_error() {
        let llm = Arc::new(ScriptedLlm::new(vec![Ok("   ".to_string())]));
        let crew = Crew::new(llm, 0.3).with_task(task("one"));

        let err = crew.kickoff(&inputs()).await.unwrap_err();
        match err {
            CrewError::TaskFailed { source, .. } => {
                assert!(matches!(*source, CrewError::EmptyCompletion { ref task } if task == "one"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_input_fails_before_any_call() {
        let llm = Arc::new(ScriptedLlm::new(vec![]));
        let crew = Crew::new(llm.clone(), 0.3).with_task(task("one"));

        let err = crew.kickoff(&HashMap::new()).await.unwrap_err();

        assert!(matches!(err, CrewError::TemplateError { .. }));
        assert!(llm.requests().is_empty());
    }

    #[tokio::test]
    async fn test_empty_crew_is_rejected() {
        let llm = Arc::new(ScriptedLlm::new(vec![]));
        let crew = Crew::new(llm, 0.3);
        assert!(matches!(crew.kickoff(&inputs()).await, Err(CrewError::ConfigError { .. })));
    }
}
