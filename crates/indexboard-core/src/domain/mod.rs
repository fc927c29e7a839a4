pub mod date;
pub mod models;
pub mod symbol;
pub mod timestamp;

pub use date::{DateRange, TradingDate};
pub use models::{HistoryRow, PriceHistory, SummarySnapshot};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
