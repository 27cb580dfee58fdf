use clap::Parser;

use habit_hero_infrastructure::config::ApiConfig;
use habit_hero_infrastructure::logging;
use habit_hero_lib::application::services::ConfigService;
use habit_hero_lib::presentation::bootstrap::build_app_state;
use habit_hero_lib::presentation::cli::{Cli, Command};
use habit_hero_lib::presentation::commands;
use habit_hero_lib::presentation::error::{CommandError, CommandResult};
use habit_hero_lib::presentation::output::Output;

fn init_logging(config: &ConfigService) {
    let log_dir = config.log_dir();
    let level = config.get_log_level();

    match logging::init_logger(&log_dir, level.as_str()) {
        Ok(_) => {
            tracing::info!("habit-hero {} starting", env!("CARGO_PKG_VERSION"));
            tracing::info!("File logging initialized at: {}", log_dir.display());
        }
        Err(e) => {
            eprintln!("warning: failed to initialize file logging: {}", e);

            let _ = tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
                )
                .with_target(true)
                .try_init();
        }
    }
}

async fn run(config: ConfigService, cmd: Command, out: &Output) -> CommandResult<()> {
    let api = ApiConfig::from_env().map_err(CommandError::from)?;
    let state = build_app_state(config, api).await?;
    commands::execute(&state, cmd, out).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let out = Output::new(cli.json);

    let config = ConfigService::new(&ConfigService::default_dir()?)?;
    init_logging(&config);

    let result = match cli.cmd {
        Command::Calc { calc } => commands::execute_offline(calc, &out),
        cmd => run(config, cmd, &out).await,
    };

    if let Err(e) = result {
        tracing::error!("[cli] command failed: {}", e);
        out.error(&e);
        return Err(e.into());
    }

    Ok(())
}
