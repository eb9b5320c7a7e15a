pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::OpenAiCompatibleClient;
pub use app::LifestyleAdvisor;
pub use config::{AppConfig, SecretStore};
pub use core::{crew::Crew, roster::Recommendations};
pub use utils::error::{CrewError, Result};
pub use web::AppState;
