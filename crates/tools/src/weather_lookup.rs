//! Weather lookup tool — stub that returns randomly sampled weather.
//!
//! In production this would call a real weather API (OpenWeatherMap, etc.).
//! The result always has the same shape; the condition, temperature and
//! humidity are drawn uniformly from fixed sets and bounded ranges.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::Mutex;
use toolroute_core::error::ToolError;
use toolroute_core::tool::{schema, Tool, ToolResult, WeatherReport};

/// Conditions a reading can report.
pub const CONDITIONS: [&str; 5] = ["Sunny", "Cloudy", "Rainy", "Partly Cloudy", "Clear"];

/// Temperature range in °C used when none (or an empty one) is given.
pub const DEFAULT_TEMPERATURE: RangeInclusive<i32> = 10..=39;
/// Humidity range in % used when none (or an empty one) is given.
pub const DEFAULT_HUMIDITY: RangeInclusive<u32> = 40..=79;

const NOTE: &str =
    "This is simulated weather data. In production, this would connect to a real weather API.";

pub struct WeatherLookupTool {
    temperature: RangeInclusive<i32>,
    humidity: RangeInclusive<u32>,
    rng: Mutex<StdRng>,
}

impl WeatherLookupTool {
    /// Sample from OS entropy.
    pub fn new(temperature: RangeInclusive<i32>, humidity: RangeInclusive<u32>) -> Self {
        Self::with_rng(temperature, humidity, StdRng::from_os_rng())
    }

    /// Sample from a fixed seed, for reproducible readings.
    pub fn seeded(temperature: RangeInclusive<i32>, humidity: RangeInclusive<u32>, seed: u64) -> Self {
        Self::with_rng(temperature, humidity, StdRng::seed_from_u64(seed))
    }

    /// Empty ranges fall back to the defaults.
    fn with_rng(mut temperature: RangeInclusive<i32>, mut humidity: RangeInclusive<u32>, rng: StdRng) -> Self {
        if temperature.is_empty() {
            tracing::warn!(?temperature, "Empty temperature range, using default");
            temperature = DEFAULT_TEMPERATURE;
        }
        if humidity.is_empty() {
            tracing::warn!(?humidity, "Empty humidity range, using default");
            humidity = DEFAULT_HUMIDITY;
        }
        Self {
            temperature,
            humidity,
            rng: Mutex::new(rng),
        }
    }

    fn sample(&self, location: &str) -> WeatherReport {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let condition = CONDITIONS[rng.random_range(0..CONDITIONS.len())];
        let temperature = rng.random_range(self.temperature.clone());
        let humidity = rng.random_range(self.humidity.clone());

        WeatherReport {
            location: location.to_string(),
            condition: condition.to_string(),
            temperature: format!("{temperature}°C"),
            humidity: format!("{humidity}%"),
            note: NOTE.to_string(),
        }
    }
}

impl Default for WeatherLookupTool {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPERATURE, DEFAULT_HUMIDITY)
    }
}

#[async_trait]
impl Tool for WeatherLookupTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Get current weather information for a location"
    }

    fn parameter_schema(&self) -> BTreeMap<String, String> {
        schema(&[("location", "string - the city or location name")])
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let location = arguments["location"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'location' argument".into()))?;

        Ok(ToolResult::Weather(self.sample(location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_reading(s: &str) -> i64 {
        s.trim_end_matches(|c: char| !c.is_ascii_digit()).parse().unwrap()
    }

    #[tokio::test]
    async fn lookup_returns_weather() {
        let result = WeatherLookupTool::default()
            .execute(serde_json::json!({"location": "paris"}))
            .await
            .unwrap();

        let ToolResult::Weather(report) = result else {
            panic!("expected a weather report");
        };
        assert_eq!(report.location, "paris");
        assert!(CONDITIONS.contains(&report.condition.as_str()));
        assert!(report.temperature.ends_with("°C"));
        assert!(report.humidity.ends_with('%'));
    }

    #[tokio::test]
    async fn readings_stay_within_bounds() {
        let tool = WeatherLookupTool::seeded(10..=39, 40..=79, 7);
        for _ in 0..200 {
            let ToolResult::Weather(report) = tool
                .execute(serde_json::json!({"location": "Tokyo"}))
                .await
                .unwrap()
            else {
                panic!("expected a weather report");
            };
            let temp = parse_reading(&report.temperature);
            let humidity = parse_reading(&report.humidity);
            assert!((10..=39).contains(&temp), "temperature {temp}");
            assert!((40..=79).contains(&humidity), "humidity {humidity}");
            assert!(CONDITIONS.contains(&report.condition.as_str()));
        }
    }

    #[tokio::test]
    async fn same_seed_same_readings() {
        let a = WeatherLookupTool::seeded(10..=39, 40..=79, 42);
        let b = WeatherLookupTool::seeded(10..=39, 40..=79, 42);
        let args = serde_json::json!({"location": "London"});
        for _ in 0..5 {
            assert_eq!(
                a.execute(args.clone()).await.unwrap(),
                b.execute(args.clone()).await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn degenerate_range_is_fixed() {
        let tool = WeatherLookupTool::seeded(21..=21, 50..=50, 1);
        let ToolResult::Weather(report) = tool
            .execute(serde_json::json!({"location": "Oslo"}))
            .await
            .unwrap()
        else {
            panic!("expected a weather report");
        };
        assert_eq!(report.temperature, "21°C");
        assert_eq!(report.humidity, "50%");
    }

    #[tokio::test]
    #[allow(clippy::reversed_empty_ranges)]
    async fn inverted_ranges_fall_back_to_defaults() {
        let tool = WeatherLookupTool::seeded(39..=10, 79..=40, 3);
        for _ in 0..50 {
            let ToolResult::Weather(report) = tool
                .execute(serde_json::json!({"location": "Lima"}))
                .await
                .unwrap()
            else {
                panic!("expected a weather report");
            };
            assert!(DEFAULT_TEMPERATURE.contains(&(parse_reading(&report.temperature) as i32)));
            assert!(DEFAULT_HUMIDITY.contains(&(parse_reading(&report.humidity) as u32)));
        }
    }

    #[tokio::test]
    async fn missing_location_returns_error() {
        let result = WeatherLookupTool::default().execute(serde_json::json!({})).await;
        assert!(result.is_err());
    }

    #[test]
    fn tool_descriptor() {
        let desc = WeatherLookupTool::default().descriptor();
        assert_eq!(desc.name, "get_weather");
    }
}
