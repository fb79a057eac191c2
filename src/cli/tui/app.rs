//! TUI application state and logic

use std::collections::HashMap;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use super::event::{Event, EventHandler};
use super::view;
use super::Terminal;
use crate::domain::{ItemId, MenuCatalog, MenuItem, MAX_QUANTITY};
use crate::session::OrderSession;
use crate::storage::OrderLog;

/// Keys bound to menu items, in menu order. Skips the navigation keys
/// (`j`, `k`) and `q`.
const HOTKEYS: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'l', 'm', 'n', 'o', 'p', 'r', 's', 't', 'u',
    'v', 'w', 'x', 'y', 'z',
];

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Prompting for the customer's name
    CustomerName(String),
    /// Adding and removing items
    Ordering,
    /// Order ended; the next key exits
    Finished,
}

/// How the session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Saved,
    SaveFailed(String),
    Cancelled,
}

/// Application state
pub struct App {
    /// Log finalized orders are appended to
    log: OrderLog,

    catalog: &'static MenuCatalog,

    /// Active session, once the customer is known
    session: Option<OrderSession>,

    /// Dispatch table from key to menu item
    hotkeys: HashMap<char, ItemId>,

    /// Selected row in the menu list
    selected: usize,

    /// Quantity typed ahead of an item key
    pending_quantity: Option<u32>,

    input_mode: InputMode,

    /// Status message to display
    status_message: Option<String>,

    outcome: Option<SessionOutcome>,

    should_quit: bool,
}

impl App {
    /// Create a new application. Prompts for a name if `customer` is `None`.
    pub fn new(log: OrderLog, customer: Option<&str>) -> Self {
        let catalog = MenuCatalog::standard();
        let hotkeys = catalog
            .items()
            .iter()
            .zip(HOTKEYS)
            .map(|(item, key)| (*key, item.id().clone()))
            .collect();

        let mut app = Self {
            log,
            catalog,
            session: None,
            hotkeys,
            selected: 0,
            pending_quantity: None,
            input_mode: InputMode::CustomerName(String::new()),
            status_message: None,
            outcome: None,
            should_quit: false,
        };

        if let Some(name) = customer {
            app.start_session(name);
        }

        app
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: &EventHandler) -> Result<SessionOutcome> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Tick => {}
            }
        }

        Ok(self.outcome.clone().unwrap_or(SessionOutcome::Cancelled))
    }

    fn draw(&self, frame: &mut Frame) {
        view::draw(frame, self);
    }

    /// Handle key events
    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.cancel();
            return;
        }

        match &self.input_mode {
            InputMode::CustomerName(_) => self.handle_name_key(key),
            InputMode::Ordering => self.handle_order_key(key),
            InputMode::Finished => self.should_quit = true,
        }
    }

    /// Handle keys while the customer name is being typed
    fn handle_name_key(&mut self, key: KeyEvent) {
        let InputMode::CustomerName(name) = &self.input_mode else {
            return;
        };
        let mut name = name.clone();

        match key.code {
            KeyCode::Esc => self.cancel(),
            KeyCode::Enter => self.start_session(&name),
            KeyCode::Backspace => {
                name.pop();
                self.input_mode = InputMode::CustomerName(name);
            }
            KeyCode::Char(c) => {
                name.push(c);
                self.input_mode = InputMode::CustomerName(name);
            }
            _ => {}
        }
    }

    /// Handle keys while building the order
    fn handle_order_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let digit = c.to_digit(10).unwrap_or(0);
                let quantity = self.pending_quantity.unwrap_or(0) * 10 + digit;
                self.pending_quantity = Some(quantity.min(MAX_QUANTITY));
            }
            KeyCode::Char(c) if self.hotkeys.contains_key(&c) => {
                if let Some(id) = self.hotkeys.get(&c).cloned() {
                    self.add(&id);
                }
            }
            KeyCode::Char(' ') => {
                if let Some(id) = self.selected_item().map(|item| item.id().clone()) {
                    self.add(&id);
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected = (self.selected + 1) % self.catalog.len();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = (self.selected + self.catalog.len() - 1) % self.catalog.len();
            }
            KeyCode::Backspace => self.remove_last(),
            KeyCode::Enter => self.end_order(),
            KeyCode::Esc | KeyCode::Char('q') => self.cancel(),
            KeyCode::Char('?') => {
                self.status_message = Some(
                    "[key] add  [0-9] quantity  j/k:move  space:add selected  backspace:remove last  enter:end order  esc:quit"
                        .to_string(),
                );
            }
            _ => {}
        }
    }

    fn start_session(&mut self, customer: &str) {
        let session = OrderSession::new(customer, self.log.clone());
        self.status_message = Some(format!("Ordering for {}", session.order().customer_name()));
        self.session = Some(session);
        self.input_mode = InputMode::Ordering;
    }

    fn add(&mut self, id: &ItemId) {
        let quantity = self.pending_quantity.take().unwrap_or(1);
        let Some(session) = self.session.as_mut() else {
            return;
        };

        self.status_message = Some(match session.add_item(id, quantity) {
            Ok(item) => format!("Added {} x {}", quantity, item.name()),
            Err(e) => e.to_string(),
        });
    }

    fn remove_last(&mut self) {
        self.pending_quantity = None;
        let Some(session) = self.session.as_mut() else {
            return;
        };

        self.status_message = Some(match session.remove_last() {
            Ok(Some(item)) => format!("Removed {}", item.name()),
            Ok(None) => "Order is empty".to_string(),
            Err(e) => e.to_string(),
        });
    }

    fn end_order(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let (outcome, message) = match session.finalize() {
            Ok(()) => (SessionOutcome::Saved, "Order saved!".to_string()),
            Err(e) => {
                let message = format!("Error saving order to file: {}", e);
                (SessionOutcome::SaveFailed(e.to_string()), message)
            }
        };

        self.status_message = Some(format!(
            "{} Thank you for your order! Press any key to exit.",
            message
        ));
        self.outcome = Some(outcome);
        self.input_mode = InputMode::Finished;
    }

    fn cancel(&mut self) {
        if self.outcome.is_none() {
            self.outcome = Some(SessionOutcome::Cancelled);
        }
        self.should_quit = true;
    }

    pub fn catalog(&self) -> &'static MenuCatalog {
        self.catalog
    }

    pub fn session(&self) -> Option<&OrderSession> {
        self.session.as_ref()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&'static MenuItem> {
        self.catalog.items().get(self.selected)
    }

    /// Key bound to the given item, if any
    pub fn hotkey_for(&self, id: &ItemId) -> Option<char> {
        self.hotkeys
            .iter()
            .find(|(_, bound)| *bound == id)
            .map(|(key, _)| *key)
    }

    pub fn pending_quantity(&self) -> Option<u32> {
        self.pending_quantity
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
