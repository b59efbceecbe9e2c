use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tripplanner::{TripForm, TripPlannerConfig, TripPlannerService, telemetry, web};

/// AI-powered travel planner
#[derive(Parser)]
#[command(name = "tripplanner", version, about = "AI-powered travel planner with destination weather")]
struct Cli {
    /// Path to config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level and print the effective configuration
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the planner form over HTTP (default)
    Serve {
        /// Port to listen on, overriding the configuration
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Plan one trip and print the result
    Plan {
        #[arg(long)]
        source: String,

        #[arg(long)]
        destination: String,

        /// Start date (YYYY-MM-DD), defaults to today
        #[arg(long, default_value = "")]
        start_date: String,

        /// End date (YYYY-MM-DD), defaults to today
        #[arg(long, default_value = "")]
        end_date: String,

        #[arg(long, default_value = "")]
        budget: String,

        /// Any, Flight, Train, Bus or Cab
        #[arg(long, default_value = "Any")]
        mode: String,
    },

    /// Print the current weather description for a location
    Weather {
        #[arg(short, long)]
        location: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = TripPlannerConfig::load_from_path(cli.config.clone())?;
    let telemetry_guard = telemetry::init(&config.logging, cli.verbose)?;

    if cli.verbose {
        println!(
            "Using config from: {}",
            TripPlannerConfig::describe_source(cli.config.as_deref())
        );
        println!("Model: {} (temperature {})", config.llm.model, config.llm.temperature);
        println!("Weather API: {}", config.weather.base_url);
        println!("Log level: {}", config.logging.level);
    }

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            web::run(&config).await.context("Web server failed")?;
        }
        Command::Plan {
            source,
            destination,
            start_date,
            end_date,
            budget,
            mode,
        } => {
            let service = TripPlannerService::from_config(&config)?;
            let form = TripForm {
                budget,
                preferred_mode: mode,
                ..TripForm::new(source, destination).with_dates(start_date, end_date)
            };
            let outcome = service.plan_trip(&form).await;
            if outcome.is_planned() {
                println!("{}", outcome.display_text());
            } else {
                eprintln!("{}", outcome.display_text());
                drop(telemetry_guard);
                std::process::exit(1);
            }
        }
        Command::Weather { location } => {
            let service = TripPlannerService::from_config(&config)?;
            let description = service.weather().describe(&location).await;
            println!("Weather forecast at {location}: {description}");
        }
    }

    Ok(())
}
