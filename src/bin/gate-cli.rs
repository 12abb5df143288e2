use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "gate-cli")]
#[command(about = "Management CLI for the Admin Gate", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8081")]
    url: String,

    /// Bearer credential sent in the X-Access-Token header
    #[arg(short, long)]
    token: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gate system status
    Status,
    /// View gate decision counters
    Stats,
    /// Inspect the sanitized runtime configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert("X-Access-Token", HeaderValue::from_str(&cli.token)?);

    let path = match cli.command {
        Commands::Status => "/admin/status",
        Commands::Stats => "/admin/stats",
        Commands::Config => "/admin/config",
    };

    let res = client
        .get(format!("{}{}", cli.url, path))
        .headers(headers)
        .send()
        .await?;
    print_response(res).await?;

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
