pub mod bar;
pub mod paper;
pub mod signals;
pub mod trend;

pub use bar::*;
pub use paper::*;
pub use signals::*;
pub use trend::*;
