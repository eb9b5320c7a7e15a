use httpmock::prelude::*;
use lifestyle_crew::config::LlmSettings;
use lifestyle_crew::core::roster::{self, LIFESTYLE_INPUT};
use lifestyle_crew::domain::model::ApiKey;
use lifestyle_crew::{Crew, CrewError, OpenAiCompatibleClient, Recommendations};
use std::collections::HashMap;
use std::sync::Arc;

fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

fn settings(server: &MockServer) -> LlmSettings {
    LlmSettings {
        base_url: server.url("/openai/v1"),
        max_retries: 0,
        ..LlmSettings::default()
    }
}

fn inputs(lifestyle: &str) -> HashMap<String, String> {
    HashMap::from([(LIFESTYLE_INPUT.to_string(), lifestyle.to_string())])
}

/// 四個任務依序打到 OpenAI 相容端點，後面的任務帶著前面的輸出
#[tokio::test]
async fn test_roster_runs_sequentially_against_chat_api() {
    let server = MockServer::start();

    let essentials = server.mock(|when, then| {
        when.method(POST)
            .path("/openai/v1/chat/completions")
            .header("authorization", "Bearer gsk_integration")
            .body_contains("TASK: ESSENTIAL PRODUCTS")
            .body_contains("Hiker");
        then.status(200).json_body(completion("* Boots: ankle support"));
    });

    let apparel = server.mock(|when, then| {
        when.method(POST)
            .path("/openai/v1/chat/completions")
            .body_contains("TASK: APPAREL AND ACCESSORIES")
            .body_contains("* Boots: ankle support");
        then.status(200).json_body(completion("* Rain shell"));
    });

    let gadgets = server.mock(|when, then| {
        when.method(POST)
            .path("/openai/v1/chat/completions")
            .body_contains("TASK: GADGETS AND TECHNOLOGY")
            .body_contains("* Rain shell");
        then.status(200).json_body(completion("* GPS watch"));
    });

    let tips = server.mock(|when, then| {
        when.method(POST)
            .path("/openai/v1/chat/completions")
            .body_contains("TASK: EXPERIENCED TIPS")
            .body_contains("* GPS watch");
        then.status(200).json_body(completion("1. Break in your boots"));
    });

    let client = OpenAiCompatibleClient::new(&settings(&server), Some(ApiKey::new("gsk_integration"))).unwrap();
    let crew = roster::assemble(Crew::new(Arc::new(client), 0.3));

    let output = tokio_test::assert_ok!(crew.kickoff(&inputs("Hiker")).await);

    essentials.assert();
    apparel.assert();
    gadgets.assert();
    tips.assert();

    let names: Vec<&str> = output.tasks_output.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["essentials", "apparel", "gadgets", "tips"]);

    let recommendations = Recommendations::from_crew_output("Hiker", &output).unwrap();
    assert_eq!(recommendations.essentials, "* Boots: ankle support");
    assert_eq!(recommendations.apparel, "* Rain shell");
    assert_eq!(recommendations.gadgets, "* GPS watch");
    assert_eq!(recommendations.tips, "1. Break in your boots");
}

/// 第二個任務失敗時整個 crew 失敗，之後的任務不會送出
#[tokio::test]
async fn test_model_failure_aborts_remaining_tasks() {
    let server = MockServer::start();

    let essentials = server.mock(|when, then| {
        when.method(POST)
            .path("/openai/v1/chat/completions")
            .body_contains("TASK: ESSENTIAL PRODUCTS");
        then.status(200).json_body(completion("* Controller"));
    });

    let apparel = server.mock(|when, then| {
        when.method(POST)
            .path("/openai/v1/chat/completions")
            .body_contains("TASK: APPAREL AND ACCESSORIES");
        then.status(400)
            .json_body(serde_json::json!({"error": {"message": "model_decommissioned"}}));
    });

    let later = server.mock(|when, then| {
        when.method(POST)
            .path("/openai/v1/chat/completions")
            .body_contains("TASK: GADGETS AND TECHNOLOGY");
        then.status(200).json_body(completion("unused"));
    });

    let client = OpenAiCompatibleClient::new(&settings(&server), Some(ApiKey::new("gsk_integration"))).unwrap();
    let crew = roster::assemble(Crew::new(Arc::new(client), 0.3));

    let err = tokio_test::assert_err!(crew.kickoff(&inputs("Gamer")).await);

    essentials.assert_hits(1);
    apparel.assert_hits(1);
    later.assert_hits(0);

    match err {
        CrewError::TaskFailed { task, source } => {
            assert_eq!(task, "apparel");
            assert!(matches!(*source, CrewError::LlmError { status: 400, ref message } if message == "model_decommissioned"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
