//! `toolroute tools` — List registered tools.
//!
//! The registry and the classifier are separate: a tool can be registered
//! without any classifier rule routing to it. The listing flags those.

use toolroute_agent::IntentClassifier;
use toolroute_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let registry = toolroute_tools::registry_from_config(&config);
    let routable = IntentClassifier::routable_tools();

    println!("Registered tools");
    println!("================");
    for tool in registry.list_tools() {
        let reach = if routable.contains(&tool.name.as_str()) {
            "routable"
        } else {
            "not routable"
        };
        println!();
        println!("  {} ({reach})", tool.name);
        println!("    {}", tool.description);
        for (param, meaning) in &tool.parameter_schema {
            println!("    - {param}: {meaning}");
        }
    }

    Ok(())
}
