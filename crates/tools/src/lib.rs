//! Built-in tool implementations for ToolRoute.
//!
//! All four tools are local mocks: web search, arithmetic, weather and
//! currency conversion. None of them touch the network.

pub mod calculator;
pub mod currency_converter;
pub mod weather_lookup;
pub mod web_search;

use toolroute_config::AppConfig;
use toolroute_core::tool::ToolRegistry;

pub use calculator::CalculatorTool;
pub use currency_converter::CurrencyConverterTool;
pub use weather_lookup::WeatherLookupTool;
pub use web_search::WebSearchTool;

/// Create a tool registry with all built-in tools and their default settings.
pub fn default_registry() -> ToolRegistry {
    registry_from_config(&AppConfig::default())
}

/// Create a tool registry with all built-in tools, configured from `config`.
///
/// Registration order is the order `list_tools` reports.
pub fn registry_from_config(config: &AppConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(WebSearchTool::new(config.search.result_url.clone())));
    registry.register(Box::new(CalculatorTool));
    registry.register(Box::new(WeatherLookupTool::new(
        config.weather.temperature_min..=config.weather.temperature_max,
        config.weather.humidity_min..=config.weather.humidity_max,
    )));
    registry.register(Box::new(
        CurrencyConverterTool::new(config.currency.rates.clone()).strict(config.currency.strict),
    ));
    registry
}
