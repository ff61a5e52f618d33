use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    widgets::TableState,
};
use rust_decimal::Decimal;

use crate::{
    app::{TradingSession, ui},
    models::{Candle, Quote, TimeRange, TradeAction},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputMode {
    Normal,
    Search,
    Quantity,
}

pub struct App {
    pub(crate) session: TradingSession,
    pub(crate) symbol: String,
    pub(crate) search_input: String,
    pub(crate) quote: Option<Quote>,
    pub(crate) candles: Vec<Candle>,
    pub(crate) time_range: TimeRange,
    pub(crate) analysis: Option<String>,
    pub(crate) trade_action: TradeAction,
    pub(crate) quantity_input: String,
    pub(crate) input_mode: InputMode,
    pub(crate) table_state: TableState,
    pub(crate) popup_message: Option<String>,
    pub(crate) error_popup: Option<String>,
}

impl App {
    pub fn new(session: TradingSession, symbol: String) -> Self {
        Self {
            session,
            symbol,
            search_input: String::new(),
            quote: None,
            candles: Vec::new(),
            time_range: TimeRange::Day,
            analysis: None,
            trade_action: TradeAction::Buy,
            quantity_input: String::from("1"),
            input_mode: InputMode::Normal,
            table_state: TableState::default(),
            popup_message: None,
            error_popup: None,
        }
    }

    fn show_popup(&mut self, message: &str) {
        self.popup_message = Some(message.to_string());
    }

    fn clear_popup(&mut self) {
        self.popup_message = None;
    }

    fn show_error_popup(&mut self, message: &str) {
        self.error_popup = Some(message.to_string());
    }

    fn clear_error_popup(&mut self) {
        self.error_popup = None;
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_app(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.refresh_market_data(terminal).await?;

        loop {
            terminal.draw(|frame| ui::render(frame, self))?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if self.error_popup.is_some() {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                        self.clear_error_popup();
                    }
                    continue;
                }

                match self.input_mode {
                    InputMode::Search => match key.code {
                        KeyCode::Esc => {
                            self.search_input.clear();
                            self.input_mode = InputMode::Normal;
                        }
                        KeyCode::Backspace => {
                            self.search_input.pop();
                        }
                        KeyCode::Char(c) if c.is_ascii_alphanumeric() || c == '.' => {
                            self.search_input.push(c.to_ascii_uppercase());
                        }
                        KeyCode::Enter => {
                            if !self.search_input.is_empty() {
                                self.symbol = self.search_input.clone();
                                self.search_input.clear();
                                self.analysis = None;
                                self.input_mode = InputMode::Normal;
                                self.refresh_market_data(terminal).await?;
                            }
                        }
                        _ => {}
                    },
                    InputMode::Quantity => match key.code {
                        KeyCode::Esc | KeyCode::Enter => {
                            self.input_mode = InputMode::Normal;
                        }
                        KeyCode::Backspace => {
                            self.quantity_input.pop();
                        }
                        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                            self.quantity_input.push(c);
                        }
                        _ => {}
                    },
                    InputMode::Normal => match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('/') => {
                            self.input_mode = InputMode::Search;
                        }
                        KeyCode::Char('e') => {
                            self.input_mode = InputMode::Quantity;
                        }
                        KeyCode::Char('b') => self.trade_action = TradeAction::Buy,
                        KeyCode::Char('s') => self.trade_action = TradeAction::Sell,
                        KeyCode::Char('1') => {
                            self.set_time_range(TimeRange::Day, terminal).await?;
                        }
                        KeyCode::Char('2') => {
                            self.set_time_range(TimeRange::Month, terminal).await?;
                        }
                        KeyCode::Char('3') => {
                            self.set_time_range(TimeRange::Year, terminal).await?;
                        }
                        KeyCode::Char('r') => {
                            self.refresh_market_data(terminal).await?;
                        }
                        KeyCode::Char('m') => {
                            self.session.toggle_mode();
                            self.analysis = None;
                            self.refresh_market_data(terminal).await?;
                        }
                        KeyCode::Char('a') => {
                            self.request_analysis(terminal).await?;
                        }
                        KeyCode::Char('t') => {
                            self.submit_trade();
                        }
                        KeyCode::Enter | KeyCode::Esc => {
                            self.clear_popup();
                            self.table_state.select(None);
                        }
                        KeyCode::Down => {
                            let positions = self.session.ledger().positions();
                            if !positions.is_empty() {
                                let i = match self.table_state.selected() {
                                    Some(i) => {
                                        if i >= positions.len() - 1 {
                                            0
                                        } else {
                                            i + 1
                                        }
                                    }
                                    None => 0,
                                };
                                self.table_state.select(Some(i));
                            }
                        }
                        KeyCode::Up => {
                            let positions = self.session.ledger().positions();
                            if !positions.is_empty() {
                                let i = match self.table_state.selected() {
                                    Some(i) => {
                                        if i == 0 {
                                            positions.len() - 1
                                        } else {
                                            i - 1
                                        }
                                    }
                                    None => 0,
                                };
                                self.table_state.select(Some(i));
                            }
                        }
                        _ => {}
                    },
                }
            }
        }
    }

    async fn refresh_market_data<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.show_popup(&format!("Loading {}...", self.symbol));
        terminal.draw(|frame| ui::render(frame, self))?;

        let quote = self.session.data().get_quote(&self.symbol).await;
        let candles = self
            .session
            .data()
            .get_candles(&self.symbol, self.time_range)
            .await;

        self.quote = Some(quote);
        self.candles = candles;
        self.clear_popup();

        Ok(())
    }

    async fn set_time_range<B: Backend>(
        &mut self,
        range: TimeRange,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        if self.time_range != range {
            self.time_range = range;
            self.refresh_market_data(terminal).await?;
        }

        Ok(())
    }

    async fn request_analysis<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let Some(quote) = self.quote.clone() else {
            self.show_error_popup("No quote loaded yet");
            return Ok(());
        };

        self.show_popup("Generating analysis...");
        terminal.draw(|frame| ui::render(frame, self))?;

        let analysis = self.session.data().get_analysis(&self.symbol, &quote).await;

        self.analysis = Some(analysis);
        self.clear_popup();

        Ok(())
    }

    /// Settle against the quote captured by the last market-data fetch.
    fn submit_trade(&mut self) {
        let Some(quote) = self.quote.clone() else {
            self.show_error_popup("No quote loaded yet");
            return;
        };

        let quantity = match self.quantity_input.parse::<Decimal>() {
            Ok(quantity) => quantity,
            Err(_) => {
                self.show_error_popup(&format!("Invalid quantity '{}'", self.quantity_input));
                return;
            }
        };

        match self
            .session
            .execute_trade(&self.symbol, self.trade_action, quantity, *quote.price())
        {
            Ok(record) => {
                self.show_popup(&format!(
                    "Executed: {} {} {} @ {}",
                    record.action(),
                    record.quantity(),
                    record.symbol(),
                    record.price()
                ));
            }
            Err(err) => self.show_error_popup(&format!("Trade rejected: {}", err)),
        }
    }
}
