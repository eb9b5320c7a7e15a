use crate::domain::model::{RenderedPrompt, TaskOutput, TaskSpec};
use crate::utils::error::{CrewError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

const CONTEXT_SEPARATOR: &str = "\n\n----------\n\n";

lazy_static! {
    static ref PLACEHOLDER_RE: Regex = Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
}

/// 把 `{name}` 佔位符換成輸入值；任何未提供的佔位符都是錯誤
pub fn interpolate(template: &str, inputs: &HashMap<String, String>) -> Result<String> {
    let missing: Vec<String> = PLACEHOLDER_RE
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .filter(|name| !inputs.contains_key(name))
        .collect();

    if !missing.is_empty() {
        return Err(CrewError::TemplateError {
            message: format!("Missing inputs for placeholders: {}", missing.join(", ")),
        });
    }

    let rendered = PLACEHOLDER_RE.replace_all(template, |caps: &regex::Captures| {
        inputs.get(&caps[1]).cloned().unwrap_or_default()
    });

    Ok(rendered.into_owned())
}

/// 組出單一任務的 system/user prompt
pub fn render_task(
    task: &TaskSpec,
    inputs: &HashMap<String, String>,
    context: &[TaskOutput],
) -> Result<RenderedPrompt> {
    let goal = interpolate(&task.agent.goal, inputs)?;
    let description = interpolate(&task.description, inputs)?;

    let system = format!(
        "You are {}. {}\nYour personal goal is: {}",
        task.agent.role, task.agent.backstory, goal
    );

    let mut user = format!(
        "{}\n\nThis is the expected criteria for your final answer: {}\n\
         You MUST return the actual complete content as the final answer, not a summary.",
        description, task.expected_output
    );

    if !context.is_empty() {
        let shared = context
            .iter()
            .map(|output| format!("## {}\n{}", output.agent_role, output.raw))
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);
        user.push_str("\n\nThis is the context you're working with:\n");
        user.push_str(&shared);
    }

    Ok(RenderedPrompt {
        task: task.name.clone(),
        agent_role: task.agent.role.clone(),
        system,
        user,
    })
}
