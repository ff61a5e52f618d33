#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::api::mock;
    use crate::models::{AssetKind, TimeRange};

    #[test]
    fn generates_requested_number_of_candles() {
        for range in [TimeRange::Day, TimeRange::Month, TimeRange::Year] {
            let candles = mock::generate_candles(range.candle_count(), 150.0);
            assert_eq!(candles.len(), range.candle_count());
        }
    }

    #[test]
    fn candles_are_in_ascending_time_order() {
        let candles = mock::generate_candles(30, 150.0);

        for pair in candles.windows(2) {
            assert!(pair[0].time() < pair[1].time());
        }
    }

    #[test]
    fn candle_envelope_contains_open_and_close() {
        let candles = mock::generate_candles(250, 150.0);

        for candle in &candles {
            assert!(candle.high() >= candle.open());
            assert!(candle.high() >= candle.close());
            assert!(candle.low() <= candle.open());
            assert!(candle.low() <= candle.close());
            assert!(*candle.volume() >= 50_000);
            assert!(*candle.volume() < 1_050_000);
        }
    }

    #[test]
    fn quote_has_coherent_levels() {
        let quote = mock::generate_quote("AAPL");

        assert_eq!(quote.symbol(), "AAPL");
        assert!(*quote.price() > Decimal::ZERO);
        assert!(quote.high() > quote.low());
    }

    #[test]
    fn seed_portfolio_matches_starting_state() {
        let positions = mock::seed_positions();

        let cash = positions
            .iter()
            .find(|p| *p.kind() == AssetKind::Cash)
            .unwrap();
        assert_eq!(cash.symbol(), "USD");
        assert_eq!(*cash.quantity(), dec!(50000));

        let aapl = positions.iter().find(|p| p.symbol() == "AAPL").unwrap();
        assert_eq!(*aapl.quantity(), dec!(150));
        assert_eq!(*aapl.average_cost(), dec!(145.20));
    }

    #[test]
    fn seed_trades_are_most_recent_first() {
        let trades = mock::seed_trades();

        assert_eq!(trades.len(), 3);
        for pair in trades.windows(2) {
            assert!(pair[0].timestamp() > pair[1].timestamp());
        }
    }

    #[test]
    fn canned_analysis_mentions_the_symbol() {
        assert!(mock::canned_analysis("NVDA").contains("NVDA"));
    }
}
