pub mod app;
pub mod ledger;
pub mod session;
pub mod ui;

pub use app::App;
pub use ledger::{CashPolicy, Ledger, LedgerError};
pub use session::TradingSession;
