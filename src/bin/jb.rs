use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "jb")]
#[command(about = "Command-line client for the junkboy anchor service", long_about = None)]
struct Cli {
    /// API base URL, prefix included
    #[arg(short, long, default_value = "http://localhost:8080/v1")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bookmark a URL
    Add { url: String },
    /// List every anchor
    List,
    /// Show one anchor
    Get { id: i64 },
    /// Change the URL of an anchor
    Update { id: i64, url: String },
    /// Remove an anchor
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Add { url } => {
            client
                .post(format!("{}/anchor", base))
                .json(&json!({ "url": url }))
                .send()
                .await?
        }
        Commands::List => client.get(format!("{}/anchors", base)).send().await?,
        Commands::Get { id } => client.get(format!("{}/anchor/{}", base, id)).send().await?,
        Commands::Update { id, url } => {
            client
                .put(format!("{}/anchor", base))
                .json(&json!({ "id": id, "url": url }))
                .send()
                .await?
        }
        Commands::Delete { id } => {
            client
                .delete(format!("{}/anchor/{}", base, id))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    if text.is_empty() {
        println!("{}", status);
        return Ok(());
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
