use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Operator CLI for the webhook relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show recorded captures, newest first
    History,
    /// Clear the recorded history
    Clear,
    /// Install a response override
    SetResponse {
        /// Override kind: "json" or "text"
        kind: String,
        /// Response body
        body: String,
    },
    /// Remove the response override
    ResetResponse,
    /// Send a test webhook
    Send {
        /// Request body
        body: String,
        /// Content-Type header for the request
        #[arg(short, long, default_value = "application/json")]
        content_type: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::History => {
            let res = client
                .get(format!("{}/api/history", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Clear => {
            let res = client
                .delete(format!("{}/api/history", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::SetResponse { kind, body } => {
            let res = client
                .put(format!("{}/api/response", cli.url))
                .json(&serde_json::json!({ "kind": kind, "body": body }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::ResetResponse => {
            let res = client
                .delete(format!("{}/api/response", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Send { body, content_type } => {
            let res = client
                .post(format!("{}/webhook", cli.url))
                .header(reqwest::header::CONTENT_TYPE, content_type)
                .body(body)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("{}", text);
        }
        std::process::exit(1);
    }

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
