use clap::Parser;
use lifestyle_crew::utils::error::ErrorSeverity;
use lifestyle_crew::utils::{logger, validation::Validate};
use lifestyle_crew::{AppConfig, AppState, CliConfig, Command, CrewError};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting lifestyle-crew");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    cli.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    // 密鑰只在啟動時讀一次
    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => exit_with(&e),
    };

    let outcome = match cli.command() {
        Command::Serve { .. } => lifestyle_crew::web::serve(Arc::new(state), &config.server.bind).await,
        Command::Run { lifestyle, dry_run } => run_once(&state, &lifestyle, dry_run).await,
    };

    if let Err(e) = outcome {
        exit_with(&e);
    }
}

async fn run_once(state: &AppState, lifestyle: &str, dry_run: bool) -> lifestyle_crew::Result<()> {
    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - no model calls will be made");
        for prompt in state.advisor.preview(lifestyle)? {
            println!("=== {} ({})", prompt.task, prompt.agent_role);
            println!("[system]\n{}\n", prompt.system);
            println!("[user]\n{}\n", prompt.user);
        }
        return Ok(());
    }

    let recommendations = state.advisor.recommend(lifestyle).await?;
    for (specialist, text) in recommendations.sections() {
        println!("{}\n{}\n{}\n", specialist.tab_label(), "-".repeat(40), text);
    }
    Ok(())
}

fn exit_with(e: &CrewError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
