//! Paper Trading Service
//!
//! Keeps a simulated cash balance and long-only positions driven by the
//! display signal:
//! - STRONG BUY opens a position sized as a fraction of cash
//! - STRONG SELL closes the open position
//! - anything else holds and marks the position to the latest close

use std::collections::{BTreeMap, VecDeque};

use tracing::{debug, info};

use crate::config::PaperConfig;
use crate::error::{AppError, Result};
use crate::types::{
    DisplaySignal, Fill, OrderSide, PaperAccountSummary, PaperAction, Position, SignalSnapshot,
};

/// Maximum fills kept in the account history.
const MAX_FILL_HISTORY: usize = 100;

/// Paper trading account.
#[derive(Debug, Clone)]
pub struct PaperTrader {
    config: PaperConfig,
    cash_balance: f64,
    realized_pnl: f64,
    positions: BTreeMap<String, Position>,
    /// Most recent fills, oldest first.
    fills: VecDeque<Fill>,
    fill_count: usize,
}

impl PaperTrader {
    /// Create an account funded with the configured starting balance.
    pub fn new(config: PaperConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            cash_balance: config.initial_balance,
            config,
            realized_pnl: 0.0,
            positions: BTreeMap::new(),
            fills: VecDeque::with_capacity(MAX_FILL_HISTORY),
            fill_count: 0,
        })
    }

    pub fn config(&self) -> &PaperConfig {
        &self.config
    }

    pub fn cash_balance(&self) -> f64 {
        self.cash_balance
    }

    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(&symbol.to_uppercase())
    }

    /// Cash plus the marked value of every open position.
    pub fn equity(&self) -> f64 {
        self.cash_balance + self.positions.values().map(Position::market_value).sum::<f64>()
    }

    /// Act on a signal snapshot for `symbol`.
    pub fn apply(&mut self, symbol: &str, snapshot: &SignalSnapshot) -> Result<PaperAction> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(AppError::BadRequest("symbol is required".to_string()));
        }

        let price = snapshot.close;
        if let Some(position) = self.positions.get_mut(&symbol) {
            position.last_price = price;
        }

        let action = match (snapshot.signal, self.positions.contains_key(&symbol)) {
            (DisplaySignal::StrongBuy, false) => self.open(&symbol, price, snapshot.time),
            (DisplaySignal::StrongSell, true) => self.close(&symbol, price, snapshot.time),
            (DisplaySignal::StrongBuy, true) => PaperAction::Held {
                reason: format!("already long {}", symbol),
            },
            (DisplaySignal::StrongSell, false) => PaperAction::Held {
                reason: format!("no position in {} to sell", symbol),
            },
            (DisplaySignal::Wait, _) => PaperAction::Held {
                reason: DisplaySignal::Wait.label().to_string(),
            },
        };

        Ok(action)
    }

    fn open(&mut self, symbol: &str, price: f64, time: i64) -> PaperAction {
        let spend = self.cash_balance * self.config.position_size_pct;
        if price <= 0.0 || spend <= 0.0 {
            return PaperAction::Held {
                reason: format!("cannot size a position at price {} with spend {}", price, spend),
            };
        }

        let fee = spend * self.config.fee_pct;
        let quantity = (spend - fee) / price;
        self.cash_balance -= spend;

        let fill = Fill::new(symbol, OrderSide::Buy, quantity, price, fee, time);
        self.positions.insert(
            symbol.to_string(),
            Position {
                symbol: symbol.to_string(),
                quantity,
                // Cost per unit including the entry fee
                entry_price: spend / quantity,
                last_price: price,
                opened_at: time,
            },
        );
        self.record(fill.clone());

        info!("Paper buy {} {} @ {}", quantity, symbol, price);
        PaperAction::Bought { fill }
    }

    fn close(&mut self, symbol: &str, price: f64, time: i64) -> PaperAction {
        let position = match self.positions.remove(symbol) {
            Some(position) => position,
            None => {
                return PaperAction::Held {
                    reason: format!("no position in {} to sell", symbol),
                }
            }
        };

        let proceeds = position.quantity * price;
        let fee = proceeds * self.config.fee_pct;
        let realized_pnl = proceeds - fee - position.quantity * position.entry_price;

        self.cash_balance += proceeds - fee;
        self.realized_pnl += realized_pnl;

        let fill = Fill::new(symbol, OrderSide::Sell, position.quantity, price, fee, time);
        self.record(fill.clone());

        info!(
            "Paper sell {} {} @ {} (realized {:.2})",
            position.quantity, symbol, price, realized_pnl
        );
        PaperAction::Sold { fill, realized_pnl }
    }

    fn record(&mut self, fill: Fill) {
        self.fills.push_back(fill);
        self.fill_count += 1;
        while self.fills.len() > MAX_FILL_HISTORY {
            self.fills.pop_front();
        }
    }

    /// Reset to the starting balance with no positions or fills.
    pub fn reset(&mut self) {
        self.cash_balance = self.config.initial_balance;
        self.realized_pnl = 0.0;
        self.positions.clear();
        self.fills.clear();
        self.fill_count = 0;
        debug!("Reset paper account to {}", self.cash_balance);
    }

    pub fn summary(&self) -> PaperAccountSummary {
        let starting_balance = self.config.initial_balance;
        let equity = self.equity();
        let total_return_pct = if starting_balance > 0.0 {
            ((equity - starting_balance) / starting_balance) * 100.0
        } else {
            0.0
        };

        PaperAccountSummary {
            starting_balance,
            cash_balance: self.cash_balance,
            equity,
            realized_pnl: self.realized_pnl,
            unrealized_pnl: self.positions.values().map(Position::unrealized_pnl).sum(),
            total_return_pct,
            positions: self.positions.values().cloned().collect(),
            fills: self.fills.iter().cloned().collect(),
            fill_count: self.fill_count,
        }
    }
}
