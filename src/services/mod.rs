pub mod paper;
pub mod signals;

pub use paper::PaperTrader;
pub use signals::{SignalEngine, SignalSettings};
