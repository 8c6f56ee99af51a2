//! Analyse command implementation
//!
//! Loads a price history, runs the analysis facade and writes the report.

use std::path::Path;

use tailrisk_risk::{AnalysisFacade, AnalysisResult};
use tracing::info;

use crate::config::AppConfig;
use crate::loader::load_price_history;
use crate::report::{render, OutputFormat};
use crate::Result;

/// Loads `prices` and analyses them under `config`.
pub fn analyse(config: &AppConfig, prices: &Path) -> Result<AnalysisResult> {
    let history = load_price_history(prices)?;
    if let Some((first, last)) = history.date_range() {
        info!(%first, %last, "Price history range");
    }
    Ok(AnalysisFacade::default().run(&config.analysis, &history)?)
}

/// Run the analyse command
pub fn run(
    config: &AppConfig,
    prices: &Path,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    info!(
        symbol = %config.analysis.symbol,
        prices = %prices.display(),
        num_simulations = config.analysis.num_simulations,
        days = config.analysis.days_to_simulate,
        "Running analysis"
    );

    let result = analyse(config, prices)?;
    let rendered = render(&result, format)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, rendered)?;
            info!(path = %path.display(), "Report written");
        }
        None => println!("{}", rendered),
    }

    info!(
        var95 = result.metrics().var95,
        regime = result.risk_state().regime.label(),
        "Analysis complete"
    );
    Ok(())
}
