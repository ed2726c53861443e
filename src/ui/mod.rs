//! Ratatui front-end for the debt tracker. The renderer is a dumb projection
//! of [`crate::view::LedgerView`]: every frame rebuilds the banner, total,
//! commit form, and entry list from current state, so there is no incremental
//! update path to drift out of sync with the store.

mod app;
mod form;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
