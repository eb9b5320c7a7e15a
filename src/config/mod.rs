pub mod app_config;
pub mod secrets;

pub use app_config::{AppConfig, CrewSettings, LlmSettings, SecretsConfig, ServerConfig};
pub use secrets::SecretStore;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "lifestyle-crew")]
#[command(about = "Product recommendations for a lifestyle from a crew of LLM specialists")]
pub struct CliConfig {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the secrets file holding the API key
    #[arg(long, global = true)]
    pub secrets: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the recommendation form over HTTP (default)
    Serve {
        /// Address to listen on, overrides server.bind
        #[arg(long)]
        bind: Option<String>,
    },
    /// Run the crew once and print the four sections
    Run {
        #[arg(short, long)]
        lifestyle: String,

        /// Show the prompts without calling the model
        #[arg(long)]
        dry_run: bool,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數覆寫檔案配置
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(secrets) = &self.secrets {
            config.secrets.path = secrets.clone();
        }
        if let Some(Command::Serve { bind: Some(bind) }) = &self.command {
            config.server.bind = bind.clone();
        }
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve { bind: None })
    }
}
