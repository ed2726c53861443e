//! Binary entry point that glues the SQLite-backed ledger to the TUI: open
//! the store, hydrate the initial app state, and drive the Ratatui event loop
//! until the user exits.

use debt_tracker::{run_app, App, DebtStore, TerminalBridge};

/// Initialize persistence, build the application state, and launch the event
/// loop. Returning a `Result` bubbles fatal initialization problems (for
/// example an unreadable data directory, or a database written by a newer
/// build) to the terminal instead of leaving a dead screen with no diagnostic.
/// The store is closed explicitly on the way out so flush failures surface
/// too.
fn main() -> anyhow::Result<()> {
    let store = DebtStore::open_default()?;
    let mut app = App::new(store, Box::new(TerminalBridge))?;
    run_app(&mut app)?;
    app.into_store().close()?;
    Ok(())
}
