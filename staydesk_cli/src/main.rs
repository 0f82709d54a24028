mod commands;
mod messages;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use staydesk_lib::Client;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "staydesk")]
#[command(about = "Administer bookings and rooms on a staydesk backend")]
struct Cli {
    /// Backend base URL
    #[arg(
        long,
        env = "STAYDESK_API_URL",
        default_value = "http://localhost:8080",
        global = true
    )]
    api_url: String,

    /// Bearer token attached to every request
    #[arg(long, env = "STAYDESK_TOKEN", global = true)]
    token: Option<String>,

    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage bookings
    Bookings(commands::bookings::BookingsArgs),
    /// Manage rooms
    Rooms(commands::rooms::RoomsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("staydesk_api=info".parse().unwrap())
                .add_directive("staydesk_lib=info".parse().unwrap())
                .add_directive("staydesk_cli=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let mut client = Client::new(&cli.api_url)?;
    if let Some(token) = &cli.token {
        client = client.with_token(token);
    }

    match &cli.command {
        Commands::Bookings(args) => commands::bookings::run(args, &client, &format).await?,
        Commands::Rooms(args) => commands::rooms::run(args, &client, &format).await?,
    }

    Ok(())
}
