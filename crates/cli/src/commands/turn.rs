//! `toolroute turn` — Run one turn from a JSON request body.
//!
//! Reads `{"messages": [...]}` from a file or stdin and prints either
//! `{"messages": [...]}` or `{"error": "..."}` on stdout.

use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use toolroute_agent::TurnRunner;
use toolroute_config::AppConfig;
use toolroute_core::message::ChatResponse;

pub async fn run(file: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let runner = TurnRunner::from_config(&config);

    let body = match file {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    let response = runner.respond(&body).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if matches!(response, ChatResponse::Error { .. }) {
        std::process::exit(2);
    }
    Ok(())
}
