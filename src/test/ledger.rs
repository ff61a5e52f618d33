#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::app::ledger::{CashPolicy, Ledger, LedgerError};
    use crate::models::{AssetKind, Position, TradeAction};

    fn sample_ledger(policy: CashPolicy) -> Ledger {
        Ledger::with_state(
            String::from("USD"),
            policy,
            vec![
                Position::new(
                    String::from("USD"),
                    String::from("Cash"),
                    dec!(50000),
                    dec!(1),
                    AssetKind::Cash,
                ),
                Position::new(
                    String::from("AAPL"),
                    String::from("Apple Inc."),
                    dec!(150),
                    dec!(145.20),
                    AssetKind::Stock,
                ),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn buy_merges_with_weighted_average_cost() {
        let mut ledger = sample_ledger(CashPolicy::Margin);

        ledger
            .apply_trade("AAPL", TradeAction::Buy, dec!(50), dec!(160.00))
            .unwrap();

        let position = ledger.position("AAPL").unwrap();
        assert_eq!(position.quantity().normalize(), dec!(200));
        assert_eq!(position.average_cost().normalize(), dec!(148.90));
        assert_eq!(ledger.cash_balance().normalize(), dec!(42000));
    }

    #[test]
    fn buy_creates_new_position_at_execution_price() {
        let mut ledger = sample_ledger(CashPolicy::Margin);

        ledger
            .apply_trade("MSFT", TradeAction::Buy, dec!(10), dec!(300.00))
            .unwrap();

        let position = ledger.position("MSFT").unwrap();
        assert_eq!(position.quantity().normalize(), dec!(10));
        assert_eq!(position.average_cost().normalize(), dec!(300));
        assert_eq!(ledger.cash_balance().normalize(), dec!(47000));
    }

    #[test]
    fn average_cost_is_quantity_weighted_mean_over_buys() {
        let mut ledger = Ledger::new(String::from("USD"), CashPolicy::Margin);

        ledger
            .apply_trade("TSLA", TradeAction::Buy, dec!(20), dec!(100.00))
            .unwrap();
        ledger
            .apply_trade("TSLA", TradeAction::Buy, dec!(30), dec!(200.00))
            .unwrap();
        ledger
            .apply_trade("TSLA", TradeAction::Buy, dec!(50), dec!(150.00))
            .unwrap();

        // (20*100 + 30*200 + 50*150) / 100
        let position = ledger.position("TSLA").unwrap();
        assert_eq!(position.quantity().normalize(), dec!(100));
        assert_eq!(position.average_cost().normalize(), dec!(155.5));
    }

    #[test]
    fn partial_sell_keeps_average_cost() {
        let mut ledger = sample_ledger(CashPolicy::Margin);

        ledger
            .apply_trade("AAPL", TradeAction::Sell, dec!(50), dec!(160.00))
            .unwrap();

        let position = ledger.position("AAPL").unwrap();
        assert_eq!(position.quantity().normalize(), dec!(100));
        assert_eq!(position.average_cost().normalize(), dec!(145.2));
        assert_eq!(ledger.cash_balance().normalize(), dec!(58000));
    }

    #[test]
    fn full_sell_removes_position() {
        let mut ledger = sample_ledger(CashPolicy::Margin);

        ledger
            .apply_trade("AAPL", TradeAction::Sell, dec!(150), dec!(160.00))
            .unwrap();

        assert!(ledger.position("AAPL").is_none());
        assert_eq!(ledger.cash_balance().normalize(), dec!(74000));
    }

    #[test]
    fn oversell_is_rejected_without_mutation() {
        let mut ledger = sample_ledger(CashPolicy::Margin);
        let before = ledger.clone();

        let result = ledger.apply_trade("AAPL", TradeAction::Sell, dec!(200), dec!(160.00));

        assert_eq!(
            result,
            Err(LedgerError::InsufficientHoldings {
                symbol: String::from("AAPL"),
                held: dec!(150),
                requested: dec!(200),
            })
        );
        assert_eq!(ledger.positions(), before.positions());
        assert_eq!(ledger.trades(), before.trades());
    }

    #[test]
    fn sell_of_unheld_symbol_is_rejected() {
        let mut ledger = sample_ledger(CashPolicy::Margin);

        let result = ledger.apply_trade("MSFT", TradeAction::Sell, dec!(1), dec!(300.00));

        assert_eq!(
            result,
            Err(LedgerError::InsufficientHoldings {
                symbol: String::from("MSFT"),
                held: Decimal::ZERO,
                requested: dec!(1),
            })
        );
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut ledger = sample_ledger(CashPolicy::Margin);

        let result = ledger.apply_trade("AAPL", TradeAction::Buy, Decimal::ZERO, dec!(160.00));

        assert_eq!(result, Err(LedgerError::InvalidQuantity(Decimal::ZERO)));
        assert!(ledger.trades().is_empty());
    }

    #[test]
    fn non_positive_price_is_rejected() {
        let mut ledger = sample_ledger(CashPolicy::Margin);

        let result = ledger.apply_trade("AAPL", TradeAction::Buy, dec!(1), dec!(-5));

        assert_eq!(result, Err(LedgerError::InvalidPrice(dec!(-5))));
    }

    #[test]
    fn empty_symbol_is_rejected() {
        let mut ledger = sample_ledger(CashPolicy::Margin);

        let result = ledger.apply_trade("", TradeAction::Buy, dec!(1), dec!(160.00));

        assert_eq!(result, Err(LedgerError::EmptySymbol));
    }

    #[test]
    fn cash_symbol_is_not_tradable() {
        let mut ledger = sample_ledger(CashPolicy::Margin);
        let before = ledger.clone();

        for action in [TradeAction::Buy, TradeAction::Sell] {
            let result = ledger.apply_trade("USD", action, dec!(100), dec!(1));

            assert_eq!(
                result,
                Err(LedgerError::CashSymbolNotTradable(String::from("USD")))
            );
        }

        let cash = ledger.position("USD").unwrap();
        assert_eq!(cash.average_cost().normalize(), dec!(1));
        assert_eq!(ledger.positions(), before.positions());
    }

    #[test]
    fn total_value_sums_positions_at_cost() {
        let ledger = sample_ledger(CashPolicy::Margin);

        // 50000 * 1 cash + 150 * 145.20 AAPL
        assert_eq!(ledger.total_value().normalize(), dec!(71780));
    }

    #[test]
    fn total_value_is_conserved_by_a_buy_at_cost() {
        let mut ledger = sample_ledger(CashPolicy::Margin);

        ledger
            .apply_trade("NVDA", TradeAction::Buy, dec!(10), dec!(450.00))
            .unwrap();

        // A buy converts cash into an equally valued position.
        assert_eq!(ledger.total_value().normalize(), dec!(71780));
    }

    #[test]
    fn margin_policy_allows_negative_cash() {
        let mut ledger = sample_ledger(CashPolicy::Margin);

        ledger
            .apply_trade("NVDA", TradeAction::Buy, dec!(200), dec!(450.00))
            .unwrap();

        assert_eq!(ledger.cash_balance().normalize(), dec!(-40000));
    }

    #[test]
    fn strict_policy_rejects_buy_beyond_cash() {
        let mut ledger = sample_ledger(CashPolicy::Strict);
        let before = ledger.clone();

        let result = ledger.apply_trade("NVDA", TradeAction::Buy, dec!(200), dec!(450.00));

        assert_eq!(
            result,
            Err(LedgerError::InsufficientCash {
                available: dec!(50000),
                required: dec!(90000),
            })
        );
        assert_eq!(ledger.positions(), before.positions());
    }

    #[test]
    fn strict_policy_allows_buy_within_cash() {
        let mut ledger = sample_ledger(CashPolicy::Strict);

        ledger
            .apply_trade("NVDA", TradeAction::Buy, dec!(100), dec!(450.00))
            .unwrap();

        assert_eq!(ledger.cash_balance().normalize(), dec!(5000));
    }

    #[test]
    fn successful_trade_is_logged_most_recent_first() {
        let mut ledger = sample_ledger(CashPolicy::Margin);

        ledger
            .apply_trade("AAPL", TradeAction::Buy, dec!(10), dec!(160.00))
            .unwrap();
        ledger
            .apply_trade("AAPL", TradeAction::Sell, dec!(5), dec!(165.00))
            .unwrap();

        let trades = ledger.trades();
        assert_eq!(trades.len(), 2);
        assert_eq!(*trades[0].action(), TradeAction::Sell);
        assert_eq!(trades[0].total().normalize(), dec!(825));
        assert_eq!(*trades[1].action(), TradeAction::Buy);
        assert_eq!(trades[1].total().normalize(), dec!(1600));
    }

    #[test]
    fn ledger_stays_usable_after_rejection() {
        let mut ledger = sample_ledger(CashPolicy::Margin);

        assert!(
            ledger
                .apply_trade("AAPL", TradeAction::Sell, dec!(500), dec!(160.00))
                .is_err()
        );
        assert!(
            ledger
                .apply_trade("AAPL", TradeAction::Sell, dec!(50), dec!(160.00))
                .is_ok()
        );
    }

    #[test]
    fn buy_creates_cash_position_when_missing() {
        let mut ledger = Ledger::new(String::from("USD"), CashPolicy::Margin);

        ledger
            .apply_trade("AAPL", TradeAction::Buy, dec!(2), dec!(100.00))
            .unwrap();

        let cash = ledger.position("USD").unwrap();
        assert_eq!(*cash.kind(), AssetKind::Cash);
        assert_eq!(cash.quantity().normalize(), dec!(-200));
    }

    #[test]
    fn cash_position_is_retained_at_zero() {
        let mut ledger = Ledger::with_state(
            String::from("USD"),
            CashPolicy::Margin,
            vec![
                Position::new(
                    String::from("USD"),
                    String::from("Cash"),
                    dec!(200),
                    dec!(1),
                    AssetKind::Cash,
                ),
                Position::new(
                    String::from("AAPL"),
                    String::from("Apple Inc."),
                    dec!(2),
                    dec!(100),
                    AssetKind::Stock,
                ),
            ],
            Vec::new(),
        );

        ledger
            .apply_trade("AAPL", TradeAction::Buy, dec!(2), dec!(100.00))
            .unwrap();

        assert!(ledger.position("USD").is_some());
        assert_eq!(ledger.cash_balance().normalize(), dec!(0));
    }
}
