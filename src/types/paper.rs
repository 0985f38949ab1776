use serde::{Deserialize, Serialize};

use super::signals::SignalSnapshot;

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "buy"),
            OrderSide::Sell => write!(f, "sell"),
        }
    }
}

/// A simulated fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    /// Unique fill ID
    pub id: String,
    pub symbol: String,
    pub side: OrderSide,
    pub quantity: f64,
    /// Price at which filled
    pub price: f64,
    /// Fee charged for this fill
    pub fee: f64,
    /// Bar timestamp the fill was priced at (ms)
    pub filled_at: i64,
}

impl Fill {
    pub fn new(
        symbol: &str,
        side: OrderSide,
        quantity: f64,
        price: f64,
        fee: f64,
        filled_at: i64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            symbol: symbol.to_string(),
            side,
            quantity,
            price,
            fee,
            filled_at,
        }
    }

    /// Quantity times price, before fees.
    pub fn notional(&self) -> f64 {
        self.quantity * self.price
    }
}

/// An open long position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub quantity: f64,
    pub entry_price: f64,
    /// Most recent close seen for this symbol.
    pub last_price: f64,
    pub opened_at: i64,
}

impl Position {
    pub fn market_value(&self) -> f64 {
        self.quantity * self.last_price
    }

    pub fn unrealized_pnl(&self) -> f64 {
        (self.last_price - self.entry_price) * self.quantity
    }
}

/// What the paper account did in response to a signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PaperAction {
    Bought { fill: Fill },
    Sold {
        fill: Fill,
        #[serde(rename = "realizedPnl")]
        realized_pnl: f64,
    },
    Held { reason: String },
}

/// Point-in-time view of the paper account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperAccountSummary {
    pub starting_balance: f64,
    pub cash_balance: f64,
    /// Cash plus marked value of open positions.
    pub equity: f64,
    pub realized_pnl: f64,
    pub unrealized_pnl: f64,
    pub total_return_pct: f64,
    pub positions: Vec<Position>,
    /// Most recent fills, oldest first; older ones are dropped.
    pub fills: Vec<Fill>,
    /// Fills since the account was opened or last reset.
    pub fill_count: usize,
}

/// Response for a paper evaluation: the signal, the action and the account after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperEvaluation {
    pub snapshot: SignalSnapshot,
    pub action: PaperAction,
    pub account: PaperAccountSummary,
}
