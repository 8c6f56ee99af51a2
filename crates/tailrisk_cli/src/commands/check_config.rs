//! Check-config command implementation
//!
//! Resolves file, environment and command-line settings and prints the
//! effective analysis request.

use tracing::info;

use crate::config::AppConfig;
use crate::Result;

/// Renders the resolved configuration as JSON.
pub fn render(config: &AppConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(&config.analysis)?)
}

/// Run the check-config command
pub fn run(config: &AppConfig) -> Result<()> {
    info!(
        symbol = %config.analysis.symbol,
        log_level = %config.log_level,
        "Configuration is valid"
    );
    println!("{}", render(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_field() {
        let json = render(&AppConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["symbol"], "UNKNOWN");
        assert_eq!(value["num_simulations"], 10_000);
        assert_eq!(value["drift_mode"], "historical");
        assert_eq!(value["stress_multipliers"].as_array().unwrap().len(), 3);
        assert!(value["target_price"].is_null());
    }
}
