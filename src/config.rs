use std::env;
use std::str::FromStr;

use crate::error::{AppError, Result};
use crate::services::signals::SignalSettings;
use crate::types::{SignalThresholds, SupertrendParams};

/// Paper trading configuration.
#[derive(Debug, Clone, Copy)]
pub struct PaperConfig {
    /// Whether the paper account routes are served.
    pub enabled: bool,
    /// Starting cash balance.
    pub initial_balance: f64,
    /// Fraction of cash spent on each entry (0.0 - 1.0].
    pub position_size_pct: f64,
    /// Fee charged per fill as a fraction of notional (0.0 - 1.0).
    pub fee_pct: f64,
}

impl Default for PaperConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            initial_balance: 100_000.0,
            position_size_pct: 0.10,
            fee_pct: 0.0,
        }
    }
}

impl PaperConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.initial_balance.is_finite() || self.initial_balance <= 0.0 {
            return Err(AppError::InvalidArgument(format!(
                "paper initial balance must be positive, got {}",
                self.initial_balance
            )));
        }
        if !(self.position_size_pct > 0.0 && self.position_size_pct <= 1.0) {
            return Err(AppError::InvalidArgument(format!(
                "paper position size must be in (0, 1], got {}",
                self.position_size_pct
            )));
        }
        if !(0.0..1.0).contains(&self.fee_pct) {
            return Err(AppError::InvalidArgument(format!(
                "paper fee must be in [0, 1), got {}",
                self.fee_pct
            )));
        }
        Ok(())
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Supertrend ATR period and band multiplier.
    pub supertrend: SupertrendParams,
    /// RSI window.
    pub rsi_period: usize,
    /// RSI thresholds for the display signal.
    pub thresholds: SignalThresholds,
    /// Neighbourhood for local-minimum detection.
    pub pattern_order: usize,
    /// Relative tolerance between two bottoms.
    pub pattern_tolerance: f64,
    /// Paper trading configuration.
    pub paper: PaperConfig,
}

/// Parse an environment variable, falling back when unset or unparseable.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .map(|v| v == "true" || v == "1")
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env_or("PORT", defaults.port),
            supertrend: SupertrendParams {
                period: env_or("SUPERTREND_PERIOD", defaults.supertrend.period),
                multiplier: env_or("SUPERTREND_MULTIPLIER", defaults.supertrend.multiplier),
            },
            rsi_period: env_or("RSI_PERIOD", defaults.rsi_period),
            thresholds: SignalThresholds {
                buy_rsi: env_or("SIGNAL_BUY_RSI", defaults.thresholds.buy_rsi),
                sell_rsi: env_or("SIGNAL_SELL_RSI", defaults.thresholds.sell_rsi),
            },
            pattern_order: env_or("PATTERN_ORDER", defaults.pattern_order),
            pattern_tolerance: env_or("PATTERN_TOLERANCE", defaults.pattern_tolerance),
            paper: PaperConfig {
                enabled: env_flag("PAPER_ENABLED", defaults.paper.enabled),
                initial_balance: env_or("PAPER_INITIAL_BALANCE", defaults.paper.initial_balance),
                position_size_pct: env_or(
                    "PAPER_POSITION_SIZE_PCT",
                    defaults.paper.position_size_pct,
                ),
                fee_pct: env_or("PAPER_FEE_PCT", defaults.paper.fee_pct),
            },
        }
    }

    /// Reject settings the indicators or paper account would refuse.
    pub fn validate(&self) -> Result<()> {
        SignalSettings::from_config(self).validate()?;
        if self.paper.enabled {
            self.paper.validate()?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            supertrend: SupertrendParams::default(),
            rsi_period: 14,
            thresholds: SignalThresholds::default(),
            pattern_order: 10,
            pattern_tolerance: 0.005,
            paper: PaperConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // PaperConfig Tests
    // =========================================================================

    #[test]
    fn test_paper_config_defaults() {
        let config = PaperConfig::default();
        assert!(config.enabled);
        assert_eq!(config.initial_balance, 100_000.0);
        assert_eq!(config.position_size_pct, 0.10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_paper_config_rejects_bad_values() {
        let mut config = PaperConfig::default();
        config.initial_balance = 0.0;
        assert!(config.validate().is_err());

        let mut config = PaperConfig::default();
        config.position_size_pct = 0.0;
        assert!(config.validate().is_err());

        let mut config = PaperConfig::default();
        config.fee_pct = 1.0;
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // Config Tests
    // =========================================================================

    #[test]
    fn test_config_default_values() {
        let config = Config::default();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.supertrend.period, 10);
        assert_eq!(config.supertrend.multiplier, 3.0);
        assert_eq!(config.rsi_period, 14);
        assert_eq!(config.thresholds.buy_rsi, 55.0);
        assert_eq!(config.thresholds.sell_rsi, 45.0);
        assert_eq!(config.pattern_order, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero_period() {
        let mut config = Config::default();
        config.supertrend.period = 0;
        assert!(matches!(
            config.validate(),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_config_ignores_paper_when_disabled() {
        let mut config = Config::default();
        config.paper.enabled = false;
        config.paper.initial_balance = -1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_or_falls_back() {
        assert_eq!(env_or("TRENDWATCH_TEST_UNSET_VARIABLE", 42usize), 42);
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(cloned.host, config.host);
        assert_eq!(cloned.port, config.port);
        assert_eq!(cloned.supertrend, config.supertrend);
    }
}
