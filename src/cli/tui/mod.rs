//! Interactive ordering TUI
//!
//! Shows the menu with a hotkey per item and a live order summary, and
//! saves the order to the log when the customer ends it.

mod app;
mod event;
mod view;

use std::io::{self, stdout, Stdout};
use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, bail, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use super::Output;
use crate::storage::Config;
use app::{App, SessionOutcome};
use event::EventHandler;

/// Terminal type alias
pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

fn init_terminal() -> Result<Terminal> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(ratatui::Terminal::new(backend)?)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Launch the TUI and report the outcome once the terminal is restored
pub fn run(output: &Output, config: &Config, customer: Option<&str>) -> Result<()> {
    output.verbose_ctx("tui", "Initializing TUI application");

    let mut app = App::new(config.order_log(), customer);
    let mut terminal = init_terminal()?;
    let event_handler = EventHandler::new(250);

    // Restore the terminal even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(&mut terminal, &event_handler)
    }));
    drop(event_handler);

    let restore_result = restore_terminal();

    let outcome = match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result?
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                return Err(anyhow!("TUI panicked: {}", s));
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                return Err(anyhow!("TUI panicked: {}", s));
            }
            return Err(anyhow!("TUI panicked with unknown error"));
        }
    };

    report(output, &app, outcome)
}

fn report(output: &Output, app: &App, outcome: SessionOutcome) -> Result<()> {
    let Some(session) = app.session() else {
        output.verbose_ctx("tui", "Exited before an order was started");
        return Ok(());
    };

    if output.is_json() {
        output.data(&serde_json::json!({
            "saved": outcome == SessionOutcome::Saved,
            "cancelled": outcome == SessionOutcome::Cancelled,
            "customer": session.order().customer_name(),
            "total": session.total(),
            "log": session.log().path().display().to_string(),
        }));
    }

    match outcome {
        SessionOutcome::Saved => {
            if !output.is_json() {
                println!("{}", session.summary_text());
                println!();
                output.success("Order saved!");
                println!("Thank you for your order!");
            }
            Ok(())
        }
        SessionOutcome::SaveFailed(e) => {
            if !output.is_json() {
                println!("{}", session.summary_text());
            }
            bail!("Error saving order to file: {}", e)
        }
        SessionOutcome::Cancelled => {
            if !output.is_json() {
                println!("Order cancelled. Nothing was saved.");
            }
            Ok(())
        }
    }
}
