//! `toolroute config` — Configuration management commands.

use toolroute_config::AppConfig;

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   Config parsed successfully");

            let mut warnings = Vec::new();

            if config.currency.strict {
                warnings.push("Strict currency mode: unknown codes produce errors");
            }

            if !config.currency.rates.contains_key("USD") {
                warnings.push("Rate table has no USD entry");
            }

            for w in &warnings {
                println!("   note: {w}");
            }

            println!();
            println!("   Default location: {}", config.classifier.default_location);
            println!(
                "   Temperature:      {}..={} °C",
                config.weather.temperature_min, config.weather.temperature_max
            );
            println!(
                "   Humidity:         {}..={} %",
                config.weather.humidity_min, config.weather.humidity_max
            );
            println!("   Currencies:       {}", config.currency.rates.len());
        }
        Err(e) => {
            println!("   Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    println!("{}", config.to_toml());
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

pub async fn init(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = AppConfig::config_path();
    if path.exists() && !force {
        return Err(format!("{} already exists (use --force to overwrite)", path.display()).into());
    }

    tokio::fs::create_dir_all(AppConfig::config_dir()).await?;
    tokio::fs::write(&path, AppConfig::default_toml()).await?;
    tracing::info!("Wrote default config to {}", path.display());
    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn config_path_is_valid() {
        let path = toolroute_config::AppConfig::config_path();
        assert!(path.to_str().unwrap().ends_with("config.toml"));
    }
}
