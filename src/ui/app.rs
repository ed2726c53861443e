use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::Debt;
use crate::native::NativeBridge;
use crate::store::DebtStore;
use crate::view::LedgerView;

use super::form::{ConfirmDelete, DebtField, DebtForm};
use super::helpers::{centered_rect, surface_error};

/// ASCII banner rendered above the running total, carried over from the
/// original tracker.
const BANNER: &str = r#"=========================
  ____  _____ ____ _____
 |  _ \| ____| __ )_   _|
 | | | |  _| |  _ \ | |
 | |_| | |___| |_) || |
 |____/|_____|____/ |_|
      T R A C K E R
========================="#;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Lines occupied by the commit form: three fields, the commit affordance,
/// and one line for validation messages.
const FORM_HEIGHT: u16 = 5;
/// Notification title used for commit feedback.
const NOTIFY_TITLE: &str = "DEBT TRACKER";

/// Interaction modes. `Normal` covers typing into the form and moving the
/// entry selection; deletion detours through an explicit confirmation.
enum Mode {
    Normal,
    ConfirmDelete(ConfirmDelete),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer. `Error` is the visible error-state
/// region: storage failures land here instead of being swallowed.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. Owns the store handle and
/// the injected capability bridge for its whole lifetime.
pub struct App {
    store: DebtStore,
    bridge: Box<dyn NativeBridge>,
    view: LedgerView,
    form: DebtForm,
    selected: usize,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Hydrate the initial view from the store. A failure here means the
    /// database never opened properly, which is fatal and should reach the
    /// terminal as a diagnostic rather than a blank screen.
    pub fn new(store: DebtStore, bridge: Box<dyn NativeBridge>) -> Result<Self> {
        let debts = store.list_all().context("failed to read the debt ledger")?;
        Ok(Self {
            store,
            bridge,
            view: LedgerView::from_debts(&debts),
            form: DebtForm::default(),
            selected: 0,
            mode: Mode::Normal,
            status: None,
        })
    }

    /// Hand the store back once the event loop is done, so the caller can run
    /// the explicit `close` half of the lifecycle and see any flush failure.
    pub fn into_store(self) -> DebtStore {
        self.store
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Tab => self.form.next_field(),
            KeyCode::BackTab => self.form.previous_field(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Enter => {
                if let Err(err) = self.commit() {
                    let message = surface_error(&err);
                    self.form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            }
            KeyCode::Delete => {
                if let Some(debt) = self.current_entry().cloned() {
                    self.clear_status();
                    return Ok(Mode::ConfirmDelete(ConfirmDelete::from(&debt)));
                }
                self.set_status("No entry selected to delete.", StatusKind::Error);
            }
            KeyCode::Char(ch) => {
                self.form.push_char(ch);
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmDelete) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.perform_delete(&confirm) {
                    Ok(_) => Ok(Mode::Normal),
                    Err(err) => {
                        let message = surface_error(&err);
                        self.set_status(message, StatusKind::Error);
                        Ok(Mode::ConfirmDelete(confirm))
                    }
                }
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    /// Validate the form and persist a new entry. Validation failures and
    /// storage failures both bubble to the caller, which routes them into the
    /// form and the footer; nothing here is fire-and-forget.
    fn commit(&mut self) -> Result<()> {
        let debt = self.form.parse_inputs()?;
        self.store
            .add(&debt)
            .context("failed to commit entry to the database")?;

        self.form.clear();
        self.bridge.vibrate();
        self.bridge
            .notify(NOTIFY_TITLE, &format!("Committed {}: ${}", debt.who, debt.cost));
        self.refresh();
        self.set_status(
            format!("Committed {}: ${}.", debt.who, debt.cost),
            StatusKind::Info,
        );
        Ok(())
    }

    fn perform_delete(&mut self, confirm: &ConfirmDelete) -> Result<()> {
        self.store
            .remove(confirm.id)
            .context("failed to delete entry from the database")?;
        self.bridge.vibrate();
        self.refresh();
        self.set_status(format!("Deleted entry for {}.", confirm.who), StatusKind::Info);
        Ok(())
    }

    /// Re-read full store state and rebuild the view. On failure the last
    /// good view stays on screen and the footer shows what went wrong.
    fn refresh(&mut self) {
        match self.store.list_all() {
            Ok(debts) => {
                self.view = LedgerView::from_debts(&debts);
                if self.selected >= self.view.len() {
                    self.selected = self.view.len().saturating_sub(1);
                }
            }
            Err(err) => {
                self.set_status(format!("Storage error: {err}"), StatusKind::Error);
            }
        }
    }

    fn current_entry(&self) -> Option<&Debt> {
        self.view.entries.get(self.selected)
    }

    fn move_selection(&mut self, offset: isize) {
        if self.view.is_empty() {
            return;
        }
        let last = self.view.len() - 1;
        let target = self.selected as isize + offset;
        self.selected = target.clamp(0, last as isize) as usize;
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    /// One full render pass: banner, total, form, entry list, footer, plus
    /// the confirmation dialog when one is open. Everything is rebuilt from
    /// current state, so drawing twice without a mutation yields the same
    /// frame.
    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let banner_height = (BANNER.lines().count() as u16).min(area.height);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(banner_height),
                Constraint::Length(1),
                Constraint::Length(FORM_HEIGHT),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT.min(area.height)),
            ])
            .split(area);

        self.draw_banner(frame, chunks[0]);
        self.draw_total(frame, chunks[1]);
        self.draw_form(frame, chunks[2]);
        self.draw_entries_label(frame, chunks[3]);
        self.draw_entries(frame, chunks[4]);
        self.draw_footer(frame, chunks[5]);

        if let Mode::ConfirmDelete(confirm) = &self.mode {
            self.draw_confirm_delete(frame, area, confirm);
        }
    }

    fn draw_banner(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(BANNER)
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn draw_total(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            format!("SYSTEM_TOTAL: {}", self.view.formatted_total()),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
        let paragraph = Paragraph::new(line).alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let who_line = self.form.build_line("Name", DebtField::Who);
        let cost_line = self.form.build_line("Amount", DebtField::Cost);
        let why_line = self.form.build_line("Reason", DebtField::Why);

        let mut lines = vec![who_line, cost_line, why_line];

        lines.push(Line::from(Span::styled(
            "[ COMMIT TO DATABASE: Enter ]",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));

        if let Some(error) = &self.form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);

        let (prefix, row) = match self.form.active {
            DebtField::Who => ("Name: ", 0u16),
            DebtField::Cost => ("Amount: ", 1),
            DebtField::Why => ("Reason: ", 2),
        };
        let cursor_x = area.x + prefix.len() as u16 + self.form.value_len(self.form.active) as u16;
        let cursor_y = area.y + row;
        if cursor_x < area.right() && cursor_y < area.bottom() {
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }

    fn draw_entries_label(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(Span::styled(
            "--- ACTIVE ENTRIES ---",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn draw_entries(&self, frame: &mut Frame, area: Rect) {
        if self.view.is_empty() {
            let paragraph = Paragraph::new(Span::styled(
                "No entries recorded.",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = self
            .view
            .entries
            .iter()
            .map(|debt| ListItem::new(debt.to_string()))
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = Line::from(Span::styled(
            "Tab switch field | Enter commit | Up/Down select | Del delete | Esc quit",
            Style::default().fg(Color::Gray),
        ));

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Removal")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!(
                "DELETE FROM MEMORY: {} (${})?",
                confirm.who, confirm.cost
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;

    #[derive(Default)]
    struct Calls {
        vibrations: usize,
        notifications: Vec<(String, String)>,
    }

    struct RecordingBridge(Rc<RefCell<Calls>>);

    impl NativeBridge for RecordingBridge {
        fn is_available(&self) -> bool {
            true
        }

        fn vibrate(&self) {
            self.0.borrow_mut().vibrations += 1;
        }

        fn notify(&self, title: &str, body: &str) {
            self.0
                .borrow_mut()
                .notifications
                .push((title.to_string(), body.to_string()));
        }
    }

    fn test_app() -> (App, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let store = DebtStore::open_in_memory().expect("open");
        let app = App::new(store, Box::new(RecordingBridge(Rc::clone(&calls)))).expect("new app");
        (app, calls)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).expect("key");
        }
    }

    fn add_entry(app: &mut App, who: &str, cost: &str, why: &str) {
        type_text(app, who);
        app.handle_key(KeyCode::Tab).expect("key");
        type_text(app, cost);
        app.handle_key(KeyCode::Tab).expect("key");
        type_text(app, why);
        app.handle_key(KeyCode::Enter).expect("key");
    }

    #[test]
    fn commit_persists_clears_buffers_and_vibrates() {
        let (mut app, calls) = test_app();
        add_entry(&mut app, "Sam", "12.50", "lunch");

        assert_eq!(app.view.len(), 1);
        assert_eq!(app.view.entries[0].who, "Sam");
        assert_eq!(app.view.formatted_total(), "$12.50");
        assert!(app.form.who.is_empty());
        assert!(app.form.cost.is_empty());
        assert!(app.form.why.is_empty());
        assert_eq!(calls.borrow().vibrations, 1);
        assert_eq!(calls.borrow().notifications.len(), 1);
    }

    #[test]
    fn commit_without_amount_is_a_no_op() {
        let (mut app, calls) = test_app();
        type_text(&mut app, "Sam");
        app.handle_key(KeyCode::Enter).expect("key");

        assert!(app.view.is_empty());
        assert_eq!(calls.borrow().vibrations, 0);
        assert!(app.form.error.is_some());
        // Buffers are only cleared on success.
        assert_eq!(app.form.who, "Sam");
    }

    #[test]
    fn commit_without_name_is_a_no_op_even_with_reason() {
        let (mut app, calls) = test_app();
        app.handle_key(KeyCode::Tab).expect("key");
        app.handle_key(KeyCode::Tab).expect("key");
        type_text(&mut app, "a perfectly good reason");
        app.handle_key(KeyCode::Enter).expect("key");

        assert!(app.view.is_empty());
        assert_eq!(calls.borrow().vibrations, 0);
    }

    #[test]
    fn newest_entry_is_listed_first_and_total_accumulates() {
        let (mut app, _calls) = test_app();
        add_entry(&mut app, "Sam", "12.50", "lunch");
        add_entry(&mut app, "Lee", "7", "");

        assert_eq!(app.view.formatted_total(), "$19.50");
        assert_eq!(app.view.entries[0].who, "Lee");
        assert_eq!(app.view.entries[1].who, "Sam");
    }

    #[test]
    fn confirmed_delete_removes_the_selected_entry() {
        let (mut app, calls) = test_app();
        add_entry(&mut app, "Sam", "12.50", "lunch");
        add_entry(&mut app, "Lee", "7", "");

        // Selection sits on the newest entry (Lee).
        app.handle_key(KeyCode::Delete).expect("key");
        app.handle_key(KeyCode::Char('y')).expect("key");

        assert_eq!(app.view.len(), 1);
        assert_eq!(app.view.entries[0].who, "Sam");
        assert_eq!(calls.borrow().vibrations, 3);
    }

    #[test]
    fn cancelled_delete_keeps_the_entry() {
        let (mut app, _calls) = test_app();
        add_entry(&mut app, "Sam", "12.50", "lunch");

        app.handle_key(KeyCode::Delete).expect("key");
        app.handle_key(KeyCode::Char('n')).expect("key");

        assert_eq!(app.view.len(), 1);
    }

    #[test]
    fn deleting_the_last_entry_zeroes_the_total() {
        let (mut app, _calls) = test_app();
        add_entry(&mut app, "Sam", "12.50", "lunch");

        app.handle_key(KeyCode::Delete).expect("key");
        app.handle_key(KeyCode::Enter).expect("key");

        assert!(app.view.is_empty());
        assert_eq!(app.view.formatted_total(), "$0.00");
    }

    #[test]
    fn garbled_amount_lists_but_adds_nothing() {
        let (mut app, _calls) = test_app();
        add_entry(&mut app, "Sam", "abc", "typo");
        add_entry(&mut app, "Lee", "5", "");

        assert_eq!(app.view.len(), 2);
        assert_eq!(app.view.formatted_total(), "$5.00");
    }

    #[test]
    fn escape_exits_from_normal_mode() {
        let (mut app, _calls) = test_app();
        assert!(app.handle_key(KeyCode::Esc).expect("key"));
    }

    #[test]
    fn store_is_handed_back_for_explicit_close() {
        let (mut app, _calls) = test_app();
        add_entry(&mut app, "Sam", "12.50", "lunch");

        let store = app.into_store();
        assert_eq!(store.list_all().expect("list").len(), 1);
        store.close().expect("close");
    }

    #[test]
    fn drawing_twice_without_mutation_is_identical() {
        let (mut app, _calls) = test_app();
        add_entry(&mut app, "Sam", "12.50", "lunch");

        let mut terminal = Terminal::new(TestBackend::new(60, 30)).expect("terminal");
        terminal.draw(|frame| app.draw(frame)).expect("first draw");
        let first = terminal.backend().buffer().clone();
        terminal.draw(|frame| app.draw(frame)).expect("second draw");

        assert_eq!(&first, terminal.backend().buffer());
    }
}
