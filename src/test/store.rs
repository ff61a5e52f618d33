#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::db::TradeStore;
    use crate::models::{TradeAction, TradeRecord};

    #[tokio::test]
    async fn saves_trades_to_the_log() {
        let store = TradeStore::in_memory().await.unwrap();

        let buy = TradeRecord::new(String::from("AAPL"), TradeAction::Buy, dec!(160), dec!(10));
        let sell = TradeRecord::new(String::from("AAPL"), TradeAction::Sell, dec!(165), dec!(5));

        let first = store.save_trade(&buy).await.unwrap();
        let second = store.save_trade(&sell).await.unwrap();

        assert!(second > first);
        assert_eq!(store.trade_count().await.unwrap(), 2);
    }
}
