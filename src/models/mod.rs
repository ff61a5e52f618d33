pub mod candle;
pub mod position;
pub mod quote;
pub mod trade;

pub use candle::{Candle, TimeRange};
pub use position::{AssetKind, Position};
pub use quote::Quote;
pub use trade::{TradeAction, TradeRecord};
