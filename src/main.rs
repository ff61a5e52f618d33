use std::env;

use alphatrade_tui::{
    api::mock,
    app::{App, CashPolicy, Ledger, TradingSession},
    db::TradeStore,
    services::{DataMode, DataService},
};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "alphatrade-tui", about = "A terminal-based paper-trading dashboard")]
struct Args {
    /// Serve synthetic data even if API keys are configured
    #[arg(long)]
    mock: bool,

    /// Initial ticker symbol
    #[arg(long, default_value = "AAPL")]
    symbol: String,

    /// SQLite file for the best-effort trade log
    #[arg(long, default_value = "alphatrade.db")]
    db: String,

    /// Reject buys the cash balance cannot cover
    #[arg(long)]
    strict_cash: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let finnhub_key = env::var("FINNHUB_API_KEY").ok().filter(|key| !key.is_empty());
    let gemini_key = env::var("GEMINI_API_KEY").ok().filter(|key| !key.is_empty());

    let mode = if args.mock || finnhub_key.is_none() {
        DataMode::Mock
    } else {
        DataMode::Real
    };
    let data = DataService::new(mode, finnhub_key, gemini_key);

    let cash_policy = if args.strict_cash {
        CashPolicy::Strict
    } else {
        CashPolicy::Margin
    };
    let ledger = Ledger::with_state(
        String::from("USD"),
        cash_policy,
        mock::seed_positions(),
        mock::seed_trades(),
    );

    let store = match TradeStore::open(&args.db).await {
        Ok(store) => Some(store),
        Err(err) => {
            log::warn!("Trade log disabled: {:#}", err);
            None
        }
    };

    let session = TradingSession::new(data, ledger, store);
    let mut app = App::new(session, args.symbol.to_uppercase());

    app.run().await?;

    Ok(())
}
