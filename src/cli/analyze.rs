//! Analysis commands (single pass and watch loop)

use anyhow::{Context, Result};

use super::output::Output;
use crate::analysis::{AnalysisEngine, LogWatcher, WatchExit, WatchNotice};
use crate::storage::{Config, LogError};

/// Analyze the order log once and print the ranking
pub fn once(output: &Output, config: &Config) -> Result<()> {
    let mut engine = AnalysisEngine::new(config.order_log());
    run_pass(output, &mut engine);
    Ok(())
}

/// Analyze once, then re-analyze on every change until the process ends
pub fn watch(output: &Output, config: &Config) -> Result<()> {
    let mut engine = AnalysisEngine::new(config.order_log());
    run_pass(output, &mut engine);

    let log_path = config.log_path.display().to_string();

    let watcher = LogWatcher::new(config.watch.debounce());
    let exit = watcher
        .run(&mut engine, |notice| match notice {
            WatchNotice::Ready { directory } => {
                output.verbose_ctx("watch", &format!("Watching directory: {}", directory.display()));
                output.event(&format!("Watching for changes to {}...", log_path));
            }
            WatchNotice::Reanalyzed { changes, engine, error } => {
                output.verbose_ctx("watch", &format!("Detected {} change event(s)", changes));
                output.event(&format!("Detected changes in {}. Reanalyzing...", log_path));
                print_report(output, engine, error);
            }
        })
        .context("Error watching the file")?;

    match exit {
        WatchExit::Stopped => output.verbose_ctx("watch", "Watch loop stopped"),
    }

    Ok(())
}

fn run_pass(output: &Output, engine: &mut AnalysisEngine) {
    output.verbose_ctx("analyze", &format!("Reading {}", engine.log().path().display()));
    let error = engine.analyze().err();
    print_report(output, engine, error.as_ref());
}

/// Prints the engine's current report, preceded by any read error
fn print_report(output: &Output, engine: &AnalysisEngine, error: Option<&LogError>) {
    if let Some(e) = error {
        output.error(&format!("Error reading the orders file: {}", e));
    }

    output.verbose_ctx(
        "analyze",
        &format!(
            "Counted {} item line(s) across {} product(s)",
            engine.tally().total(),
            engine.tally().len()
        ),
    );

    if output.is_json() {
        output.data(&serde_json::json!({
            "log": engine.log().path().display().to_string(),
            "products": engine.rank(),
            "total_items": engine.tally().total(),
            "error": error.map(|e| e.to_string()),
        }));
    } else {
        println!("{}", engine.report());
    }
}
