use clap::Parser;
use crisp_interview_lib::config::Settings;
use crisp_interview_lib::Cli;
use log::info;

#[tokio::main]
async fn main() {
    // Don't fail if .env doesn't exist
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings: {}", e);
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(settings.log_level.as_str()))
        .init();
    info!("⚙️ Settings loaded (state at {})", settings.state_path.display());

    if let Err(e) = crisp_interview_lib::run(cli, settings).await {
        eprintln!("Error running application: {:#}", e);
        std::process::exit(1);
    }
}
