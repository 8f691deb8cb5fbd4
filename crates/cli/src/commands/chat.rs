//! `toolroute chat` — Interactive or single-message chat mode.
//!
//! The transcript lives in memory for the session. Each line is one turn;
//! the produced messages are appended to the transcript.

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use toolroute_agent::TurnRunner;
use toolroute_config::AppConfig;
use toolroute_core::message::{Message, Role};

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let runner = TurnRunner::from_config(&config);
    let mut transcript: Vec<Message> = Vec::new();

    if let Some(msg) = message {
        // Single message mode
        transcript.push(Message::user(msg));
        for produced in runner.run_turn(&transcript).await? {
            print_message(&produced);
        }
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  ToolRoute — Interactive Mode");
    println!();
    println!("  Tools:     {}", runner.tools().names().join(", "));
    println!("  Default location: {}", config.classifier.default_location);
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        stdout.write_all(b"  You > ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_exit_command(line) {
            break;
        }

        transcript.push(Message::user(line));
        match runner.run_turn(&transcript).await {
            Ok(produced) => {
                println!();
                for msg in &produced {
                    print_message(msg);
                }
                println!();
                transcript.extend(produced);
            }
            Err(e) => eprintln!("  [Error] {e}"),
        }
    }

    println!();
    println!("  Goodbye!");
    println!();
    Ok(())
}

fn is_exit_command(line: &str) -> bool {
    matches!(line, "exit" | "quit" | "/exit" | "/quit" | ":q")
}

fn print_message(msg: &Message) {
    match msg.role {
        Role::Tool => {
            let name = msg.tool_call.as_deref().unwrap_or("tool");
            let result = msg
                .tool_result
                .as_ref()
                .and_then(|r| serde_json::to_string(r).ok())
                .unwrap_or_default();
            println!("  [{name}] {result}");
        }
        _ => {
            for line in msg.content.lines() {
                println!("  Assistant > {line}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_commands_recognized() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command(":q"));
        assert!(!is_exit_command("exit please"));
    }
}
