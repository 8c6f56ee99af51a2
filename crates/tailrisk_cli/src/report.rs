//! Rendering of analysis results as a text report or JSON.

use std::fmt;

use clap::ValueEnum;
use tailrisk_risk::reports::TailShiftRow;
use tailrisk_risk::AnalysisResult;

use crate::error::Result;

/// Output formats for `tailrisk analyse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Table,
    /// Pretty-printed JSON of the full result
    Json,
}

/// Renders `result` in `format`.
pub fn render(result: &AnalysisResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(TableReport(result).to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
    }
}

/// Band rows printed: roughly this many evenly spaced days plus the last.
const BAND_ROWS: usize = 6;

/// Text rendering of an [`AnalysisResult`].
pub struct TableReport<'a>(pub &'a AnalysisResult);

impl fmt::Display for TableReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let config = result.config();
        let stats = result.statistics();
        let sim = result.simulation();

        writeln!(f, "Tail risk analysis: {}", result.symbol())?;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(
            f,
            "Starting price   {:>12.2}  ({:?})",
            result.starting_price(),
            result.price_source()
        )?;
        writeln!(
            f,
            "Volatility       {:>11.2}%  ({} observations)",
            stats.volatility * 100.0,
            stats.observations
        )?;
        writeln!(
            f,
            "Drift            {:>11.2}%  ({})",
            stats.drift * 100.0,
            stats.drift_mode.label()
        )?;
        writeln!(
            f,
            "Horizon          {:>12}  trading days, {} paths, seed {}",
            sim.horizon(),
            sim.num_paths(),
            sim.seed()
        )?;
        if result.non_finite_paths() > 0 {
            writeln!(
                f,
                "Excluded paths   {:>12}  (non-finite)",
                result.non_finite_paths()
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Terminal distribution")?;
        writeln!(f, "{:>10} {:>12} {:>12}", "pctl", "return %", "price")?;
        for row in result.percentiles().rows() {
            match row.price {
                Some(price) => writeln!(
                    f,
                    "{:>10.0} {:>12.2} {:>12.2}",
                    row.percentile, row.return_pct, price
                )?,
                None => writeln!(
                    f,
                    "{:>10.0} {:>12.2} {:>12}",
                    row.percentile, row.return_pct, "-"
                )?,
            }
        }

        let metrics = result.metrics();
        let capital = result.capital();
        writeln!(f)?;
        writeln!(f, "Risk metrics (capital {:.2})", capital.capital)?;
        writeln!(f, "{:>10} {:>12} {:>12}", "", "return %", "amount")?;
        writeln!(f, "{:>10} {:>12.2} {:>12.2}", "VaR 95", metrics.var95, capital.var95)?;
        writeln!(f, "{:>10} {:>12.2} {:>12.2}", "CVaR 95", metrics.cvar95, capital.cvar95)?;
        writeln!(f, "{:>10} {:>12.2} {:>12.2}", "VaR 99", metrics.var99, capital.var99)?;
        writeln!(f, "{:>10} {:>12.2} {:>12.2}", "CVaR 99", metrics.cvar99, capital.cvar99)?;
        writeln!(
            f,
            "P(loss >= {:.1}%) = {:.2}%{}",
            capital.max_tolerable_loss_pct,
            capital.probability_exceeding_tolerance,
            if capital.var95_breaches_tolerance {
                "  [VaR 95 exceeds tolerance]"
            } else {
                ""
            }
        )?;

        let state = result.risk_state();
        writeln!(f)?;
        writeln!(
            f,
            "Risk state: {:.1} ({})",
            state.composite,
            state.regime.label()
        )?;
        writeln!(
            f,
            "  volatility ratio {:>8.3}  score {:>6.3}",
            state.volatility_ratio, state.volatility_score
        )?;
        writeln!(
            f,
            "  tail ratio       {:>8.3}  score {:>6.3}",
            state.tail_ratio, state.tail_score
        )?;
        writeln!(
            f,
            "  jump frequency   {:>8.3}  score {:>6.3}",
            state.jump_frequency, state.jump_score
        )?;
        writeln!(
            f,
            "  width            {:>8.2}  score {:>6.3}",
            state.distribution_width, state.width_score
        )?;

        writeln!(f)?;
        writeln!(f, "Stress tail shift")?;
        writeln!(
            f,
            "{:>10} {:>10} {:>10} {:>10} {:>10}",
            "mult", "vol %", "p5 %", "p1 %", "CVaR95 %"
        )?;
        for row in result.tail_shift() {
            writeln!(f, "{}", TailShiftLine(row))?;
        }

        writeln!(f)?;
        writeln!(f, "Strike guide")?;
        writeln!(
            f,
            "{:>10} {:>12} {:>12} {:>12}",
            "pctl", "return %", "strike", "P(<=) %"
        )?;
        for row in result.strike_guide() {
            writeln!(
                f,
                "{:>10.0} {:>12.2} {:>12.2} {:>12.2}",
                row.percentile, row.return_pct, row.strike, row.probability_at_or_below
            )?;
        }

        if let Some(target) = result.target() {
            writeln!(f)?;
            writeln!(
                f,
                "Target {:.2}: rank {:.2}% ({})",
                target.target_price,
                target.percentile_rank,
                target.zone.describe()
            )?;
            for boundary in &target.boundaries {
                writeln!(
                    f,
                    "  p{:<4.0} {:>12.2}",
                    boundary.percentile, boundary.price
                )?;
            }
            writeln!(
                f,
                "  median vs target {:>+8.2}%",
                target.mean_reversion_pct
            )?;
        }

        let bands = result.bands();
        if bands.days() > 0 {
            writeln!(f)?;
            writeln!(f, "Price bands (start = 100)")?;
            write!(f, "{:>6}", "day")?;
            for p in bands.percentiles() {
                write!(f, " {:>10}", format!("p{}", p))?;
            }
            writeln!(f)?;
            for day in band_days(bands.days()) {
                write!(f, "{:>6}", day)?;
                for &p in bands.percentiles() {
                    match bands.band(p).and_then(|band| band.get(day - 1)) {
                        Some(price) => write!(f, " {:>10.2}", price)?,
                        None => write!(f, " {:>10}", "-")?,
                    }
                }
                writeln!(f)?;
            }
        }

        if config.custom_price.is_some() {
            writeln!(f)?;
            writeln!(f, "Note: starting price overridden by configuration")?;
        }
        Ok(())
    }
}

/// One stress-ladder row; unavailable tail metrics print as `-`.
struct TailShiftLine<'a>(&'a TailShiftRow);

impl fmt::Display for TailShiftLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = self.0;
        write!(f, "{:>10.2} {:>10.2}", row.multiplier, row.volatility * 100.0)?;
        for value in [row.p5, row.p1, row.cvar95] {
            match value {
                Some(value) => write!(f, " {:>10.2}", value)?,
                None => write!(f, " {:>10}", "-")?,
            }
        }
        Ok(())
    }
}

/// Evenly spaced 1-based days ending at `horizon`.
fn band_days(horizon: usize) -> Vec<usize> {
    let step = horizon.div_ceil(BAND_ROWS).max(1);
    let mut days: Vec<usize> = (1..=horizon).step_by(step).collect();
    if days.last() != Some(&horizon) {
        days.push(horizon);
    }
    days
}
