//! `toolroute classify` — Show the intent selected for an utterance.

use toolroute_agent::IntentClassifier;
use toolroute_config::AppConfig;

pub async fn run(text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let classifier = IntentClassifier::new(config.classifier.default_location);
    let intent = classifier.classify(text);
    println!("{}", serde_json::to_string_pretty(&intent)?);
    Ok(())
}
