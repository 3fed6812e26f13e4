use clap::Parser;
use env_logger::Env;
use octofit_backend::config::Config;
use octofit_backend::db::Store;
use octofit_backend::seed;
use std::process::ExitCode;

/// Populate the database with sample users, teams, activities, workouts and
/// leaderboard entries.
#[derive(Parser, Debug)]
#[command(name = "populate_db", version)]
struct Args {
    /// Overrides DATABASE_URL
    #[arg(long)]
    database_url: Option<String>,

    /// Delete all existing rows before seeding
    #[arg(long)]
    flush: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(url) = args.database_url {
        config.database_url = url;
    }

    let result = async {
        let store = Store::connect(&config).await?;
        if args.flush {
            store.flush().await?;
        }
        seed::populate(&store).await
    }
    .await;

    match result {
        Ok(summary) => {
            println!("Sample data created successfully: {}.", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Seeding failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
