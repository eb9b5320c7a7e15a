pub mod crew;
pub mod prompt;
pub mod roster;

pub use crate::domain::model::{AgentProfile, CrewOutput, TaskOutput, TaskSpec};
pub use crate::domain::ports::LlmClient;
pub use crate::utils::error::Result;
