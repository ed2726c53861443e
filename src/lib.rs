//! Core library surface for the debt tracker TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: the SQLite-backed ledger store, the pure view-model step, and the
//! terminal front-end.

pub mod models;
pub mod native;
pub mod store;
pub mod ui;
pub mod view;

/// The persistence layer: an explicitly opened and closed store handle.
pub use store::{DebtStore, StoreError};

/// The domain types other layers manipulate.
pub use models::{Debt, NewDebt};

/// Pure records-to-view aggregation, unit-testable without a terminal.
pub use view::LedgerView;

/// Best-effort host feedback, injected so tests can substitute a mock.
pub use native::{NativeBridge, NullBridge, TerminalBridge};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
