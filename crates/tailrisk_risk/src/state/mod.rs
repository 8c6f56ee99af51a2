//! Composite risk-state scoring.
//!
//! Four sub-indicators, each mapped onto [0, 1] with hard clamps, are
//! averaged into a 0–100 score:
//!
//! | Indicator | Raw measure | Reference range |
//! |-----------|-------------|-----------------|
//! | Volatility regime | 20-day / 100-day realised volatility | 0.7 – 1.5 |
//! | Tail thickness | \|CVaR99\| / \|VaR99\| | 1.1 – 1.6 |
//! | Jump intensity | share of daily returns below −3% | 0 – 3% |
//! | Distribution width | P95 − P5 of simulated returns | 10 – 60 pp |

mod scorer;

pub use scorer::{RiskRegime, RiskState, RiskStateScorer};
