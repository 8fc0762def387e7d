use clap::Parser;
use prompt_moderator::cli::Cli;
use prompt_moderator::commands;
use prompt_moderator::core::config::Settings;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run().await {
        eprintln!("• {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).map_err(|e| e.to_string())?;
    commands::dispatch(&settings)
        .await
        .map(|_| ())
        .map_err(|e| e.to_string())
}
